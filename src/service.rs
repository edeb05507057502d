use chrono::{offset::Utc, DateTime, SecondsFormat};
use tonic::{Request, Response, Status};

use crate::polls::polls_server::Polls;
use crate::polls::{
    CreateQuestionRequest, DetailRequest, HealthcheckRequest, HealthcheckResponse, IndexRequest,
    IndexResponse, QuestionReply,
};
use crate::store::QuestionStore;
use crate::structures::Question;

#[derive(Debug, Clone)]
pub struct PollsAPI {
    store: QuestionStore,
    index_limit: Option<usize>,
}

impl PollsAPI {
    pub fn new(store: QuestionStore) -> Self {
        PollsAPI {
            store,
            index_limit: None,
        }
    }

    pub fn with_index_limit(mut self, limit: Option<usize>) -> Self {
        self.index_limit = limit;
        self
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }
}

fn reply(question: &Question, now: DateTime<Utc>) -> QuestionReply {
    QuestionReply {
        id: question.id,
        text: question.text.clone(),
        publication_time: question
            .publication_time
            .to_rfc3339_opts(SecondsFormat::Micros, true),
        was_published_recently: question.was_published_recently_at(now),
    }
}

#[tonic::async_trait]
impl Polls for PollsAPI {
    async fn healthcheck(
        &self,
        request: Request<HealthcheckRequest>,
    ) -> Result<Response<HealthcheckResponse>, Status> {
        log::info!(
            "Healthcheck from peer: {:?}",
            request.remote_addr()
        );

        let reply = HealthcheckResponse {
            is_healthy: true,
            message: format!("serving {} questions", self.store.len()),
        };

        Ok(Response::new(reply))
    }

    async fn index(
        &self,
        request: Request<IndexRequest>,
    ) -> Result<Response<IndexResponse>, Status> {
        log::info!(
            "Responding to index request from peer: {:?}",
            request.remote_addr()
        );
        let now = Utc::now();
        let latest_question_list = self
            .store
            .published(now, self.index_limit)?
            .iter()
            .map(|q| reply(q, now))
            .collect();
        Ok(Response::new(IndexResponse {
            latest_question_list,
        }))
    }

    async fn detail(
        &self,
        request: Request<DetailRequest>,
    ) -> Result<Response<QuestionReply>, Status> {
        log::info!(
            "Responding to request: {:?} from peer: {:?}",
            &request,
            &request.remote_addr()
        );
        let id = request.into_inner().id;
        let now = Utc::now();
        let question = self.store.published_detail(id, now)?;
        Ok(Response::new(reply(&question, now)))
    }

    async fn create_question(
        &self,
        request: Request<CreateQuestionRequest>,
    ) -> Result<Response<QuestionReply>, Status> {
        log::info!("User wants to create a question: {:?}", &request);
        let input = request.into_inner();
        let now = Utc::now();
        let question = self.store.create_with_offset(&input.text, input.days, now)?;
        Ok(Response::new(reply(&question, now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn reply_carries_rfc3339_and_recency() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let q = Question::new(3, "What's up?", now - Duration::hours(1));
        let r = reply(&q, now);
        assert_eq!(r.id, 3);
        assert_eq!(r.text, "What's up?");
        assert_eq!(r.publication_time, "2024-03-01T11:00:00.000000Z");
        assert!(r.was_published_recently);
        assert!(!reply(&q, now + Duration::days(2)).was_published_recently);
    }
}
