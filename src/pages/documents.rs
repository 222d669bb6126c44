use crate::api::models::{
    Boq, BoqItem, BoqRequest, CompanyData, CompanyProfileRequest, CoverLetterRequest,
    DocumentRecord, DocumentTemplate, EmdCalculation, GeneratedDocument,
};
use crate::api::{settle, ApiClient};
use crate::tools::bidmath;

use super::{Notices, PageState};

/// Document preparation: stored documents, reusable templates, the BOQ,
/// cover-letter and company-profile generators, and the EMD calculator. The
/// BOQ subtotal shown while editing is computed client-side; the server
/// recomputes totals when generating the document.
pub struct DocumentsPage {
    pub documents: PageState<Vec<DocumentRecord>>,
    pub templates: PageState<Vec<DocumentTemplate>>,
    pub notices: Notices,
}

impl Default for DocumentsPage {
    fn default() -> Self { Self::new() }
}

impl DocumentsPage {
    pub fn new() -> Self {
        Self { documents: PageState::new(), templates: PageState::new(), notices: Notices::new() }
    }

    pub async fn load(&self, api: &ApiClient) {
        let gen = self.documents.begin();
        let result = api.get_json::<Vec<DocumentRecord>>("documents").await;
        let (res, notice) = settle(result, "load documents");
        if self.documents.complete(gen, res) {
            self.notices.extend(notice);
        }
    }

    pub async fn load_templates(&self, api: &ApiClient) {
        let gen = self.templates.begin();
        let result = api.get_json::<Vec<DocumentTemplate>>("documents/templates").await;
        let (res, notice) = settle(result, "load templates");
        if self.templates.complete(gen, res) {
            self.notices.extend(notice);
        }
    }

    /// Live subtotal for the BOQ editor.
    pub fn boq_subtotal(items: &[BoqItem]) -> f64 {
        bidmath::boq_subtotal(items)
    }

    /// Generate a BOQ document server-side. The item list is returned on
    /// failure so the form survives a retry.
    pub async fn generate_boq(
        &self,
        api: &ApiClient,
        tender_id: &str,
        items: Vec<BoqItem>,
    ) -> Result<Boq, Vec<BoqItem>> {
        let req = BoqRequest { tender_id: tender_id.to_string(), items };
        match api.post_json::<Boq, _>("documents/generate-boq", &req).await {
            Ok(boq) => {
                self.notices.success("BOQ generated");
                Ok(boq)
            }
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "generate boq failed: {}", e);
                self.notices.error("Failed to generate BOQ");
                Err(req.items)
            }
        }
    }

    /// Generate a submission cover letter for one tender. The company form is
    /// returned on failure so nothing has to be re-entered.
    pub async fn generate_cover_letter(
        &self,
        api: &ApiClient,
        tender_id: &str,
        company: CompanyData,
    ) -> Result<GeneratedDocument, CompanyData> {
        let req = CoverLetterRequest { tender_id: tender_id.to_string(), company_data: company };
        match api.post_json::<GeneratedDocument, _>("documents/generate-cover-letter", &req).await {
            Ok(ack) => {
                let msg = if ack.message.is_empty() {
                    "Cover letter generated".to_string()
                } else {
                    ack.message.clone()
                };
                self.notices.success(msg);
                Ok(ack)
            }
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "generate cover letter failed: {}", e);
                self.notices.error("Failed to generate cover letter");
                Err(req.company_data)
            }
        }
    }

    /// Generate the standalone company profile document. Not tied to a
    /// tender; only the company form goes up.
    pub async fn generate_company_profile(
        &self,
        api: &ApiClient,
        company: CompanyData,
    ) -> Result<GeneratedDocument, CompanyData> {
        let req = CompanyProfileRequest { company_data: company };
        match api.post_json::<GeneratedDocument, _>("documents/generate-company-profile", &req).await
        {
            Ok(ack) => {
                let msg = if ack.message.is_empty() {
                    "Company profile generated".to_string()
                } else {
                    ack.message.clone()
                };
                self.notices.success(msg);
                Ok(ack)
            }
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "generate company profile failed: {}", e);
                self.notices.error("Failed to generate company profile");
                Err(req.company_data)
            }
        }
    }

    /// EMD calculator convenience endpoint; public, parameters on the query
    /// string, no bearer attached.
    pub async fn calculate_emd(
        &self,
        api: &ApiClient,
        tender_value: f64,
        emd_percentage: f64,
    ) -> Option<EmdCalculation> {
        let query = [
            ("tender_value", tender_value.to_string()),
            ("emd_percentage", emd_percentage.to_string()),
        ];
        match api.post_query_public::<EmdCalculation>("documents/calculate-emd", &query).await {
            Ok(calc) => Some(calc),
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "calculate emd failed: {}", e);
                self.notices.error("Failed to calculate EMD");
                None
            }
        }
    }
}
