use reqwest::multipart::{Form, Part};

use smartcity_boundary as json;
use smartcity_core::{
    entities::*,
    gateways::{
        AssistantGateway, AuthGateway, GatewayError, ImageGateway, ImageTarget,
        Result as GatewayResult, StatsGateway,
    },
};

use crate::{into_json, Api};

impl StatsGateway for Api {
    async fn fetch_stats(&self) -> GatewayResult<Stats> {
        let url = format!("{}/stats", self.url);
        let response = self.client.get(&url).send().await.map_err(crate::Error::from)?;
        let stats: json::Stats = into_json(response).await?;
        Ok(stats.into())
    }
}

impl AuthGateway for Api {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<SessionUser> {
        let url = format!("{}/auth/login", self.url);
        let response = self
            .client
            .post(&url)
            .json(&json::Credentials::from(credentials.clone()))
            .send()
            .await
            .map_err(crate::Error::from)?;
        logged_in_user(into_json(response).await?)
    }
}

impl AssistantGateway for Api {
    async fn natural_query(&self, question: &str) -> GatewayResult<Answer> {
        let url = format!("{}/ai/natural-query", self.url);
        let query = json::NaturalQuery {
            question: question.to_owned(),
        };
        let response = self
            .client
            .post(&url)
            .json(&query)
            .send()
            .await
            .map_err(crate::Error::from)?;
        answer(into_json(response).await?)
    }
}

impl ImageGateway for Api {
    async fn upload_image(
        &self,
        target: ImageTarget,
        file_name: &str,
        data: Vec<u8>,
    ) -> GatewayResult<String> {
        let url = format!("{}/upload/{}-image", self.url, target.as_str());
        let part = Part::bytes(data).file_name(file_name.to_owned());
        let form = Form::new().part("image", part);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(crate::Error::from)?;
        uploaded_url(into_json(response).await?)
    }
}

fn rejected(error: Option<String>, fallback: &str) -> GatewayError {
    GatewayError::Rejected(error.unwrap_or_else(|| fallback.to_owned()))
}

fn logged_in_user(response: json::LoginResponse) -> GatewayResult<SessionUser> {
    let json::LoginResponse {
        success,
        user,
        error,
    } = response;
    match user {
        Some(user) if success => Ok(user.into()),
        _ => Err(rejected(error, "Invalid credentials")),
    }
}

fn answer(response: json::NaturalQueryResponse) -> GatewayResult<Answer> {
    if !response.success {
        return Err(rejected(response.error, "The question could not be answered"));
    }
    log::debug!("The assistant returned {} rows", response.count);
    Ok(response.into())
}

fn uploaded_url(response: json::UploadResponse) -> GatewayResult<String> {
    let json::UploadResponse {
        success,
        url,
        error,
    } = response;
    match url {
        Some(url) if success => Ok(url),
        _ => Err(rejected(error, "Upload failed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn successful_login_returns_the_user() {
        let user = logged_in_user(from_json(
            r#"{"success":true,"user":{"email":"admin@smartcity.tn","name":"Admin","role":"admin"}}"#,
        ))
        .unwrap();
        assert_eq!(user.email, "admin@smartcity.tn");
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn failed_login_is_rejected() {
        let err = logged_in_user(from_json(
            r#"{"success":false,"error":"Wrong password"}"#,
        ))
        .unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Wrong password".into()));

        let err = logged_in_user(from_json(r#"{"success":true}"#)).unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Invalid credentials".into()));

        let err = logged_in_user(from_json(
            r#"{"success":false,"user":{"email":"admin@smartcity.tn"}}"#,
        ))
        .unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Invalid credentials".into()));
    }

    #[test]
    fn upload_needs_a_url() {
        let url = uploaded_url(from_json(
            r#"{"success":true,"url":"/uploads/transport-1.png"}"#,
        ))
        .unwrap();
        assert_eq!(url, "/uploads/transport-1.png");

        let err = uploaded_url(from_json(r#"{"success":true}"#)).unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Upload failed".into()));

        let err = uploaded_url(from_json(
            r#"{"success":false,"url":"/uploads/x.png","error":"File too large"}"#,
        ))
        .unwrap_err();
        assert_eq!(err, GatewayError::Rejected("File too large".into()));
    }

    #[test]
    fn unanswered_question_is_rejected() {
        let err = answer(from_json(
            r#"{"success":false,"error":"Unable to generate a query"}"#,
        ))
        .unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Unable to generate a query".into()));

        let err = answer(from_json(r#"{"success":false}"#)).unwrap_err();
        assert_eq!(
            err,
            GatewayError::Rejected("The question could not be answered".into())
        );
    }

    #[test]
    fn answered_question_keeps_the_rows() {
        let answer = answer(from_json(
            r#"{
                "success": true,
                "question": "Which buses are electric?",
                "generatedQuery": "SELECT ?t WHERE { ?t a :Bus }",
                "results": [{"nom": "Bus 12"}, {"nom": "Bus 7"}],
                "count": 2
            }"#,
        ))
        .unwrap();
        assert_eq!(answer.question, "Which buses are electric?");
        assert_eq!(answer.rows.len(), 2);
        assert_eq!(answer.rows[0]["nom"], "Bus 12");
        assert!(answer.explanation.is_none());
    }
}
