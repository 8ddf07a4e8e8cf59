use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::http::parser::{self, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::dispatcher::Dispatcher;

/// Limits applied while reading a request.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    pub read_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(30),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Drives exactly one request/response exchange, then closes.
pub struct Connection<S> {
    stream: BufReader<S>,
    dispatcher: Arc<Dispatcher>,
    limits: ConnectionLimits,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, dispatcher: Arc<Dispatcher>, limits: ConnectionLimits) -> Self {
        Self {
            stream: BufReader::new(stream),
            dispatcher,
            limits,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the exchange to completion. The stream is shut down and dropped
    /// on every path, including errors.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.get_mut().shutdown().await {
            tracing::trace!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(Some(req)) => ConnectionState::Processing(req),
                        Ok(None) => {
                            tracing::debug!("Peer closed before sending a request");
                            ConnectionState::Closed
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Rejecting malformed request");

                            let response = Response::bad_request();
                            tracing::info!(status = response.status.as_u16(), "Request handled");
                            ConnectionState::Writing(ResponseWriter::new(&response))
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    let method = req.method;
                    let path = req.path.clone();

                    let response = self.dispatcher.dispatch(req).await;

                    tracing::info!(
                        method = %method,
                        path = %path,
                        status = response.status.as_u16(),
                        "Request handled"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    // One exchange per connection: always close after writing.
                    writer.write_to_stream(self.stream.get_mut()).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Decodes a single request. A read that outlasts the timeout counts as malformed.
    pub async fn read_request(&mut self) -> Result<Option<Request>, ParseError> {
        let decode = parser::decode(&mut self.stream, self.limits.max_body_bytes);

        match tokio::time::timeout(self.limits.read_timeout, decode).await {
            Ok(result) => result,
            Err(_) => Err(ParseError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "timed out reading request",
            ))),
        }
    }
}
