use utoipa::OpenApi;

use crate::common::events::EventEnvelope;
use crate::modules::completion::dto::{
    JobStateEvent, JobStateOutcome, JobUserMetadata, OutputGroupDetail,
};
use crate::modules::submission::dto::{SubmitOutcome, UploadEvent};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::submission::handler::object_created,
        crate::modules::completion::handler::job_state,
    ),
    components(
        schemas(
            UploadEvent, SubmitOutcome,
            JobStateEvent, JobUserMetadata, OutputGroupDetail, JobStateOutcome,
            EventEnvelope<UploadEvent>, EventEnvelope<JobStateEvent>,
        )
    ),
    tags(
        (name = "Events", description = "Upload and job state events from the routing bus")
    )
)]
pub struct ApiDoc;
