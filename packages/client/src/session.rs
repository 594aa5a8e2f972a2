//! WebSocket client session management.

use std::io::Write;

use futures_util::{Sink, SinkExt, StreamExt};
use relay_server::{
    domain::{
        ChangeRoomPayload, EVENT_NEW_MESSAGE, Event, NewMessagePayload, SendMessagePayload,
    },
    infrastructure::dto::http::{LoginRequest, LoginResponse},
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, Message, client::IntoClientRequest, http::HeaderValue},
};

use crate::{command::ClientCommand, error::ClientError, formatter::MessageFormatter};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Everything needed to open a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// HTTP base URL of the relay, e.g. `http://127.0.0.1:8080`
    pub server: String,
    pub username: String,
    pub password: String,
    /// Room joined right after connecting
    pub room: String,
    /// Origin header sent with the upgrade request
    pub origin: String,
}

/// Exchange credentials for a one-time password.
pub async fn login(
    http: &reqwest::Client,
    server: &str,
    username: &str,
    password: &str,
) -> Result<String, ClientError> {
    let response = http
        .post(format!("{}/login", server.trim_end_matches('/')))
        .json(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .send()
        .await?;

    if response.status() == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ClientError::LoginRejected);
    }

    let body: LoginResponse = response.error_for_status()?.json().await?;
    Ok(body.otp)
}

/// WebSocket URL for `server` carrying `otp`.
pub fn ws_url(server: &str, otp: &str) -> Result<String, ClientError> {
    let server = server.trim_end_matches('/');
    let base = if let Some(rest) = server.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else if let Some(rest) = server.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else {
        return Err(ClientError::InvalidUrl(server.to_string()));
    };
    Ok(format!("{}/ws?otp={}", base, otp))
}

/// Open the WebSocket, sending `origin` with the upgrade request.
pub async fn connect(url: &str, origin: &str) -> Result<WsStream, ClientError> {
    let mut request = url.into_client_request()?;
    let origin_value =
        HeaderValue::from_str(origin).map_err(|_| ClientError::InvalidOrigin(origin.to_string()))?;
    request.headers_mut().insert("Origin", origin_value);

    match connect_async(request).await {
        Ok((stream, _)) => Ok(stream),
        Err(tungstenite::Error::Http(response)) => {
            Err(ClientError::ConnectionRefused(response.status().as_u16()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Translate a prompt command into the event to send, if any.
pub fn command_to_event(command: &ClientCommand, username: &str) -> Option<Event> {
    match command {
        ClientCommand::Join(room) => Some(ChangeRoomPayload { name: room.clone() }.into()),
        ClientCommand::Say(message) => Some(
            SendMessagePayload {
                message: message.clone(),
                from: username.to_string(),
            }
            .into(),
        ),
        ClientCommand::Quit => None,
    }
}

/// Text to show for a frame received from the server.
pub fn render_incoming(text: &str) -> String {
    match Event::from_json(text) {
        Ok(event) if event.event_type == EVENT_NEW_MESSAGE => {
            match event.decode_payload::<NewMessagePayload>() {
                Ok(payload) => MessageFormatter::format_new_message(&payload),
                Err(_) => MessageFormatter::format_raw_message(text),
            }
        }
        _ => MessageFormatter::format_raw_message(text),
    }
}

fn prompt(username: &str) -> String {
    format!("{}> ", username)
}

/// Print a line above the prompt and redraw the prompt.
fn print_above_prompt(line: &str, username: &str) {
    print!("\r{}\n{}", line, prompt(username));
    std::io::stdout().flush().ok();
}

async fn send_event<S>(sink: &mut S, event: &Event) -> Result<(), ClientError>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    sink.send(Message::Text(event.to_json()?.into())).await?;
    Ok(())
}

/// Run an interactive session until `/quit`, EOF, or the connection drops.
pub async fn run_session(options: SessionOptions) -> Result<(), ClientError> {
    let http = reqwest::Client::new();
    let otp = login(&http, &options.server, &options.username, &options.password).await?;
    let url = ws_url(&options.server, &otp)?;
    let stream = connect(&url, &options.origin).await?;

    tracing::info!("Connected to relay server");
    let (mut write, mut read) = stream.split();

    send_event(&mut write, &ChangeRoomPayload { name: options.room.clone() }.into()).await?;
    println!(
        "\nYou are '{}' in room '{}'. /join <room> switches rooms, /quit exits.\n",
        options.username, options.room
    );

    let username = options.username.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    print_above_prompt(&render_incoming(text.as_str()), &username);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return true;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return true;
                }
                // tungstenite answers pings on its own
                Ok(_) => {}
            }
        }
        true
    });

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<ClientCommand>();
    let prompt_text = prompt(&options.username);
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt_text) {
                Ok(line) => {
                    let Some(command) = ClientCommand::parse(&line) else {
                        continue;
                    };
                    rl.add_history_entry(line.trim()).ok();
                    let quit = command == ClientCommand::Quit;
                    if input_tx.send(command).is_err() || quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    input_tx.send(ClientCommand::Quit).ok();
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    input_tx.send(ClientCommand::Quit).ok();
                    break;
                }
            }
        }
    });

    let username = options.username.clone();
    let mut write_task = tokio::spawn(async move {
        while let Some(command) = input_rx.recv().await {
            let Some(event) = command_to_event(&command, &username) else {
                write.send(Message::Close(None)).await.ok();
                return Ok(());
            };
            send_event(&mut write, &event).await?;
            if let ClientCommand::Join(room) = &command {
                print_above_prompt(&MessageFormatter::format_room_changed(room), &username);
            }
        }
        Ok::<(), ClientError>(())
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
            Err(ClientError::ConnectionLost)
        }
        write_result = &mut write_task => {
            read_task.abort();
            match write_result {
                Ok(result) => result,
                Err(_) => Err(ClientError::ConnectionLost),
            }
        }
    }
}
