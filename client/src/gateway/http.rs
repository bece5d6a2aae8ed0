//! Reqwest-backed gateway for the Classboard service.
//!
//! Owns transport details only: URL building, basic auth, JSON and multipart
//! bodies, status mapping and decoding into engine records.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::{PostsGateway, StudentsGateway, UsersGateway};
use crate::config::ClientConfig;
use crate::error::{GatewayError, Result};
use classboard_engine::{
    AttendStatus, ImageUpload, NewPost, NewUser, Post, PostId, PostPatch, Student, StudentId,
    User, UserId,
};

/// Gateway that talks to the service over HTTP.
///
/// One instance serves all three collections.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
}

impl HttpGateway {
    /// Build a gateway with a client carrying the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a gateway around an existing reqwest client.
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `segments` under the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        Ok(self
            .client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password)))
    }

    fn json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<RequestBuilder> {
        Ok(self.request(method, segments)?.json(body))
    }

    /// Send and decode a successful JSON body.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.send_raw(builder).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send and return the body of a successful response.
    async fn send_raw(&self, builder: RequestBuilder) -> Result<Bytes> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "service rejected request");
            return Err(GatewayError::from_status(status.as_u16(), &body));
        }
        Ok(body)
    }
}

fn image_part(image: &ImageUpload) -> Result<Part> {
    let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
    match &image.content_type {
        Some(content_type) => Ok(part.mime_str(content_type)?),
        None => Ok(part),
    }
}

#[async_trait]
impl UsersGateway for HttpGateway {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.send(self.request(Method::GET, &["api", "users"])?).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.send(self.json(Method::POST, &["api", "users"], user)?).await
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let body = NewUser::new(user.name.clone(), user.email.clone());
        let id = user.id.to_string();
        self.send(self.json(Method::PUT, &["api", "users", id.as_str()], &body)?)
            .await
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        let id = id.to_string();
        self.send_raw(self.request(Method::DELETE, &["api", "users", id.as_str()])?)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl StudentsGateway for HttpGateway {
    async fn list_students(&self) -> Result<Vec<Student>> {
        self.send(self.request(Method::GET, &["api", "students"])?).await
    }

    async fn update_attend(&self, id: StudentId, attend: AttendStatus) -> Result<Student> {
        let id = id.to_string();
        let body = serde_json::json!({ "attend": attend });
        self.send(self.json(Method::PUT, &["api", "students", id.as_str(), "attend"], &body)?)
            .await
    }

    async fn update_grade(&self, id: StudentId, grade: u8) -> Result<Student> {
        let id = id.to_string();
        let body = serde_json::json!({ "grade": grade });
        self.send(self.json(Method::PUT, &["api", "students", id.as_str(), "grade"], &body)?)
            .await
    }

    async fn update_online(&self, id: StudentId, online: bool) -> Result<Student> {
        let id = id.to_string();
        let body = serde_json::json!({ "online": online });
        self.send(self.json(Method::PUT, &["api", "students", id.as_str(), "online"], &body)?)
            .await
    }
}

#[async_trait]
impl PostsGateway for HttpGateway {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.send(self.request(Method::GET, &["api", "posts"])?).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        self.send(self.json(Method::POST, &["api", "posts"], post)?).await
    }

    async fn create_post_with_file(&self, post: &NewPost, image: &ImageUpload) -> Result<Post> {
        let form = Form::new()
            .text("title", post.title.clone())
            .text("content", post.content.clone())
            .text("author", post.author.clone())
            .part("image_file", image_part(image)?);
        self.send(self.request(Method::POST, &["api", "posts", "upload"])?.multipart(form))
            .await
    }

    async fn update_post(&self, id: &PostId, patch: &PostPatch) -> Result<Post> {
        self.send(self.json(Method::PUT, &["api", "posts", id.as_str()], patch)?)
            .await
    }

    async fn update_post_file(&self, id: &PostId, image: &ImageUpload) -> Result<Post> {
        let form = Form::new().part("image_file", image_part(image)?);
        let builder = self.request(Method::PUT, &["api", "posts", id.as_str(), "upload"])?;
        self.send(builder.multipart(form)).await
    }

    async fn delete_post(&self, id: &PostId) -> Result<()> {
        self.send_raw(self.request(Method::DELETE, &["api", "posts", id.as_str()])?)
            .await?;
        Ok(())
    }
}
