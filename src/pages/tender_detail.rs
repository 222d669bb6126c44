use futures_util::future::join;

use crate::api::models::{CompetitorAnalysis, Tender, TenderAnalysis, WinPrediction};
use crate::api::{settle, ApiClient, Resource};
use crate::error::ApiResult;

use super::{Notices, PageState};

/// Detail view for one tender. The tender record and any stored analysis are
/// fetched together on mount; competitor analysis and win prediction are
/// generated on demand. A missing stored analysis (404) is the normal
/// "not analyzed yet" state, not a failure.
pub struct TenderDetailPage {
    pub tender_id: String,
    pub tender: PageState<Tender>,
    pub analysis: PageState<Option<TenderAnalysis>>,
    pub competitors: PageState<CompetitorAnalysis>,
    pub win_prediction: PageState<WinPrediction>,
    pub notices: Notices,
}

impl TenderDetailPage {
    pub fn new<S: Into<String>>(tender_id: S) -> Self {
        Self {
            tender_id: tender_id.into(),
            tender: PageState::new(),
            analysis: PageState::new(),
            competitors: PageState::new(),
            win_prediction: PageState::new(),
            notices: Notices::new(),
        }
    }

    pub async fn load(&self, api: &ApiClient) {
        let tender_gen = self.tender.begin();
        let analysis_gen = self.analysis.begin();

        let tender_path = format!("tenders/{}", self.tender_id);
        let tender_fut = api.get_json::<Tender>(&tender_path);
        let analysis_fut = self.fetch_existing_analysis(api);
        let (tender_res, analysis_res) = join(tender_fut, analysis_fut).await;

        let (res, notice) = settle(tender_res, "load tender");
        if self.tender.complete(tender_gen, res) {
            self.notices.extend(notice);
        }
        // Analysis absence is already folded into Ok(None); only real
        // failures surface, and silently (the panel just stays empty).
        let res = match analysis_res {
            Ok(a) => Resource::Ready(a),
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "load analysis failed: {}", e);
                Resource::Ready(None)
            }
        };
        self.analysis.complete(analysis_gen, res);
    }

    async fn fetch_existing_analysis(&self, api: &ApiClient) -> ApiResult<Option<TenderAnalysis>> {
        match api.get_json::<TenderAnalysis>(&format!("tenders/{}/analysis", self.tender_id)).await {
            Ok(a) => Ok(Some(a)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Run the AI analysis for this tender and store the result.
    pub async fn analyze(&self, api: &ApiClient) {
        let gen = self.analysis.begin();
        let result = api
            .post_empty::<TenderAnalysis>(&format!("tenders/{}/analyze", self.tender_id))
            .await;
        match result {
            Ok(a) => {
                if self.analysis.complete(gen, Resource::Ready(Some(a))) {
                    self.notices.success("Analysis completed");
                }
            }
            Err(e) => {
                tracing::warn!(target: "hexabid::api", "analyze failed: {}", e);
                if self.analysis.complete(gen, Resource::Ready(None)) {
                    self.notices.error("Failed to analyze tender");
                }
            }
        }
    }

    pub async fn load_competitors(&self, api: &ApiClient) {
        let gen = self.competitors.begin();
        let result = api
            .post_empty::<CompetitorAnalysis>(&format!("tenders/{}/competitors", self.tender_id))
            .await;
        let (res, notice) = settle(result, "load competitor analysis");
        if self.competitors.complete(gen, res) {
            self.notices.extend(notice);
        }
    }

    pub async fn predict_win(&self, api: &ApiClient) {
        let gen = self.win_prediction.begin();
        let result = api
            .post_empty::<WinPrediction>(&format!("tenders/{}/win-prediction", self.tender_id))
            .await;
        let (res, notice) = settle(result, "generate win prediction");
        if self.win_prediction.complete(gen, res) {
            self.notices.extend(notice);
        }
    }

    /// Invalidate all slots ahead of navigating away; anything still in
    /// flight settles into a stale generation and is dropped.
    pub fn reset(&self) {
        self.tender.reset();
        self.analysis.reset();
        self.competitors.reset();
        self.win_prediction.reset();
    }
}
