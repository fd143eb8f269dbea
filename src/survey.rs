use tracing::info;

use crate::types::SurveyResponse;

/// Consumer of completed surveys. The page hands each response to exactly
/// one handler call and never looks at it again; where responses end up
/// (log, queue, database) is the handler's business.
pub trait SubmissionHandler: Send + Sync {
    fn handle(&self, response: SurveyResponse);
}

/// Default handler: log the response and drop it. Stands in until a real
/// destination is plugged in.
pub struct LogHandler;

impl SubmissionHandler for LogHandler {
    fn handle(&self, response: SurveyResponse) {
        info!(
            safety = response.safety.value(),
            concerns = %response.concerns,
            "survey response received"
        );
    }
}
