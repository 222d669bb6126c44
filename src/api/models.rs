//! Typed response/request models for the page endpoints. All response
//! models are lenient: unknown fields are ignored and optional fields are
//! defaulted, so shape drift degrades to empty values instead of a failed
//! page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---- Dashboard ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_tenders: u64,
    #[serde(default)]
    pub my_bids: u64,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub active_tenders: u64,
    #[serde(default)]
    pub this_month_bids: u64,
    #[serde(default)]
    pub estimated_value: f64,
}

/// Acknowledgement for `POST /tenders/import`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub count: u64,
}

// ---- Tenders ----

#[derive(Debug, Clone, Deserialize)]
pub struct Tender {
    pub id: String,
    #[serde(default)]
    pub tender_id: String,
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_value: f64,
    #[serde(default)]
    pub emd_amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submission_deadline: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub status: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub eligibility_criteria: Vec<String>,
    #[serde(default)]
    pub technical_specs: Value,
}

fn default_active() -> String { "active".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct TenderAnalysis {
    pub id: String,
    pub tender_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub key_requirements: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub compliance_gaps: Vec<String>,
    #[serde(default)]
    pub estimated_effort: String,
    #[serde(default)]
    pub ai_summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitorAnalysis {
    pub id: String,
    pub tender_id: String,
    #[serde(default)]
    pub competitors: Vec<Value>,
    #[serde(default)]
    pub market_analysis: String,
    #[serde(default)]
    pub competitive_advantage: Vec<String>,
    #[serde(default)]
    pub threat_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WinPrediction {
    pub id: String,
    pub tender_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub win_probability: f64,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub recommended_bid_margin: f64,
    #[serde(default)]
    pub factors: Value,
}

// ---- Documents / BOQ / EMD ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoqItem {
    pub description: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_one")]
    pub quantity: f64,
    #[serde(default)]
    pub rate: f64,
}

fn default_unit() -> String { "Nos".to_string() }
fn default_one() -> f64 { 1.0 }

#[derive(Debug, Clone, Serialize)]
pub struct BoqRequest {
    pub tender_id: String,
    pub items: Vec<BoqItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Boq {
    pub id: String,
    pub tender_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub gst_amount: f64,
    #[serde(default)]
    pub grand_total: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmdCalculation {
    #[serde(default)]
    pub tender_value: f64,
    #[serde(default)]
    pub emd_percentage: f64,
    #[serde(default)]
    pub emd_amount: f64,
    #[serde(default)]
    pub emd_amount_formatted: String,
}

/// Reusable document template offered on the preparation page.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

/// Company details used by the letter/profile generators. Collected in the
/// form and echoed to the backend verbatim.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CompanyData {
    pub name: String,
    pub established_year: String,
    pub gst_number: String,
    pub pan_number: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub authorized_person: String,
    pub designation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverLetterRequest {
    pub tender_id: String,
    pub company_data: CompanyData,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfileRequest {
    pub company_data: CompanyData,
}

/// Acknowledgement for the document generators; the backend writes the file
/// and answers with a message plus where it landed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedDocument {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub file_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

// ---- CRM ----

#[derive(Debug, Clone, Deserialize)]
pub struct CrmContact {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "type", default)]
    pub contact_type: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ---- Chat ----

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub tender_context: Option<Value>,
}

// ---- Notifications ----

#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ---- Support ----

#[derive(Debug, Clone, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_medium")]
    pub priority: String,
    #[serde(default = "default_open")]
    pub status: String,
    #[serde(default)]
    pub responses: Vec<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_medium() -> String { "medium".to_string() }
fn default_open() -> String { "open".to_string() }

#[derive(Debug, Clone, Serialize)]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub category: String,
    pub priority: String,
}

// ---- Subscription ----

#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub ai_credits: i64,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub status: String,
}

// ---- Admin ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_tenders: u64,
    #[serde(default)]
    pub total_analyses: u64,
    #[serde(default)]
    pub revenue_this_month: f64,
    #[serde(default)]
    pub active_subscriptions: u64,
    #[serde(default)]
    pub total_support_tickets: u64,
}

// ---- Analytics / Reports ----

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryShare {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryWinRate {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub win_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyTrendPoint {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub tenders: u64,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenderTrends {
    #[serde(default)]
    pub categories: Vec<CategoryShare>,
    #[serde(default)]
    pub win_rate_by_category: Vec<CategoryWinRate>,
    #[serde(default)]
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyWinLoss {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub wins: u64,
    #[serde(default)]
    pub losses: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WinLossReport {
    #[serde(default)]
    pub wins: u64,
    #[serde(default)]
    pub losses: u64,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub monthly_data: Vec<MonthlyWinLoss>,
}
