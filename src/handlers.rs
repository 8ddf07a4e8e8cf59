//! Stock handlers wired up by the binary.
//!
//! | Route                      | Behaviour                                  |
//! |----------------------------|--------------------------------------------|
//! | `GET /`                    | empty 200                                  |
//! | `GET /echo/{content}`      | echoes `content` as text                   |
//! | `GET /user-agent`          | echoes the `User-Agent` header             |
//! | `GET /files/{filename}`    | file from the static directory             |
//! | `POST /files/{filename}`   | writes the body into the static directory  |

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::routing::{HandlerError, HandlerResult, PathParams, Reply, RouteError, Router};

/// Registers every stock route on `router`.
pub fn register_defaults(router: &mut Router, static_dir: Option<PathBuf>) -> Result<(), RouteError> {
    let static_dir = Arc::new(static_dir);

    router
        .get("/", root)?
        .get("/echo/{content}", echo)?
        .get("/user-agent", user_agent)?;

    let dir = Arc::clone(&static_dir);
    router.get("/files/{filename}", move |req, params| {
        read_file(Arc::clone(&dir), req, params)
    })?;

    let dir = static_dir;
    router.post("/files/{filename}", move |req, params| {
        write_file(Arc::clone(&dir), req, params)
    })?;

    Ok(())
}

pub async fn root(_req: Request, _params: PathParams) -> HandlerResult {
    Ok(Reply::Response(Response::new(StatusCode::Ok)))
}

pub async fn echo(_req: Request, params: PathParams) -> HandlerResult {
    let content = param(&params, "content")?;
    Ok(Reply::Text(content.to_string()))
}

pub async fn user_agent(req: Request, _params: PathParams) -> HandlerResult {
    let agent = req
        .header("User-Agent")
        .ok_or_else(|| HandlerError::bad_request("missing User-Agent header"))?;
    Ok(Reply::Text(agent.to_string()))
}

pub async fn read_file(static_dir: Arc<Option<PathBuf>>, _req: Request, params: PathParams) -> HandlerResult {
    let path = resolve(static_dir.as_deref(), param(&params, "filename")?)?;

    let contents = match tokio::fs::read(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(HandlerError::not_found(format!("{} does not exist", path.display())));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Reply::Response(
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "application/octet-stream")
            .body(contents)
            .build(),
    ))
}

pub async fn write_file(static_dir: Arc<Option<PathBuf>>, req: Request, params: PathParams) -> HandlerResult {
    let path = resolve(static_dir.as_deref(), param(&params, "filename")?)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, req.body_bytes()).await?;

    tracing::info!(path = %path.display(), bytes = req.body_bytes().len(), "Wrote file");
    Ok(Reply::Response(Response::created()))
}

fn param<'a>(params: &'a PathParams, name: &str) -> Result<&'a str, HandlerError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| HandlerError::bad_request(format!("missing path variable {name}")))
}

/// Joins `name` onto the static directory, refusing anything that could escape it.
fn resolve(static_dir: Option<&Path>, name: &str) -> Result<PathBuf, HandlerError> {
    let dir = static_dir.ok_or_else(|| HandlerError::not_found("no static directory configured"))?;

    let relative = Path::new(name);
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(HandlerError::bad_request(format!("illegal file name {name:?}")));
    }

    Ok(dir.join(relative))
}
