use serde_json::Value;

use crate::api::driver::numbered_document;
use crate::errors::CustomResult;
use crate::modules::report::ranking::RankingView;
use crate::modules::report::store::ReportStore;

/// # report document
/// `{"report": {"place1": {...}, ...}}` with the fastest driver first
pub fn report_document(store: &ReportStore) -> CustomResult<Value> {
    numbered_document("report", "place", &RankingView::by_best_lap(store.drivers()))
}
