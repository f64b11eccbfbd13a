//! The two remote operations, each turning a ticket into a [`Completion`].

use crate::upload::ApiClient;
use crate::workflow::state::{AnalysisTicket, Completion, UploadTicket};

pub async fn upload(client: &ApiClient, ticket: UploadTicket) -> Completion {
    let outcome = client.save_image(ticket.file).await;
    Completion::Upload {
        cycle: ticket.cycle,
        outcome,
    }
}

pub async fn analyze(client: &ApiClient, ticket: AnalysisTicket) -> Completion {
    let outcome = client.question_whether_dirty(&ticket.reference).await;
    Completion::Analysis {
        cycle: ticket.cycle,
        outcome,
    }
}
