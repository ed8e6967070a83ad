/// Main pipechat client app
use crate::render;
use anyhow::Result;
use futures::{SinkExt, StreamExt};
use pipechat_protocol::{dispatch, Frame, FrameCodec, ProtocolConfig, Session};
use tokio::{
    io::{ReadHalf, WriteHalf},
    net::{TcpStream, ToSocketAddrs},
};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

/// Actions taken in response to user input
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Action {
    LogOn(String),
    Send(String),
    Who,
    Quit,
}

/// Control logic for the application - receives frames and user input,
/// updates the session, and prints whatever the user should see
#[derive(Debug)]
pub(crate) struct App {
    session: Session,
    quit: bool,
    reader: FramedRead<ReadHalf<TcpStream>, FrameCodec>,
    writer: FramedWrite<WriteHalf<TcpStream>, FrameCodec>,
}

impl App {
    pub async fn connect(addr: impl ToSocketAddrs, config: ProtocolConfig) -> Result<Self> {
        let (rx, tx) = tokio::io::split(TcpStream::connect(addr).await?);
        let reader = FramedRead::new(rx, FrameCodec::new(config));
        let writer = FramedWrite::new(tx, FrameCodec::new(config));
        Ok(Self {
            session: Session::new(config),
            quit: false,
            reader,
            writer,
        })
    }

    async fn update(&mut self, action: Action) -> Result<()> {
        match action {
            Action::LogOn(nickname) => self.do_log_on(&nickname).await,
            Action::Send(text) => self.do_send(&text).await,
            Action::Who => self.do_who(),
            Action::Quit => self.do_quit().await,
        }
    }

    async fn do_log_on(&mut self, nickname: &str) -> Result<()> {
        match self.session.connect(nickname) {
            Ok(frame) => self.write(frame).await,
            Err(e) => {
                render::notice(&e.to_string());
                Ok(())
            }
        }
    }

    async fn do_send(&mut self, text: &str) -> Result<()> {
        match self.session.send_chat(text) {
            Ok(frame) => {
                self.write(frame).await?;
                render::own_message(self.session.username().unwrap_or_default(), text);
                Ok(())
            }
            Err(e) => {
                render::notice(&e.to_string());
                Ok(())
            }
        }
    }

    fn do_who(&mut self) -> Result<()> {
        render::roster(self.session.roster().as_slice());
        Ok(())
    }

    async fn do_quit(&mut self) -> Result<()> {
        if let Ok(frame) = self.session.disconnect() {
            self.write(frame).await?;
        }
        self.quit = true;
        Ok(())
    }

    async fn write(&mut self, frame: Frame) -> Result<()> {
        tracing::debug!(code = %frame.code, "sending frame");
        self.writer.send(frame).await?;
        Ok(())
    }

    fn on_closed(&mut self) {
        for event in self.session.close() {
            render::event(&event);
        }
        self.quit = true;
    }
}

/// Interprets one line typed by the user
pub(crate) fn map_line_to_action(line: &str) -> Option<Action> {
    let line = line.trim_end();
    if let Some(("/nick", rest)) = line.split_once(' ') {
        return Some(Action::LogOn(rest.trim().to_string()));
    }
    match line {
        "" => None,
        "/nick" => Some(Action::LogOn(String::new())),
        "/who" => Some(Action::Who),
        "/quit" => Some(Action::Quit),
        text => Some(Action::Send(text.to_string())),
    }
}

pub async fn run(addr: String, name: Option<String>, config: ProtocolConfig) -> Result<()> {
    let mut app = App::connect(addr, config).await?;
    let mut input = FramedRead::new(tokio::io::stdin(), LinesCodec::new());

    render::notice("connected to server, log on with /nick <name>");
    if let Some(name) = name {
        app.update(Action::LogOn(name)).await?;
    }

    loop {
        let mut action = None;

        tokio::select! {
            // apply received frames to the session
            maybe_frame = app.reader.next() => {
                match maybe_frame {
                    Some(Ok(frame)) => {
                        for event in dispatch(&mut app.session, &frame) {
                            render::event(&event);
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "connection failed");
                        app.on_closed();
                    }
                    None => app.on_closed(),
                }
            }

            // turn user input into actions
            maybe_line = input.next() => {
                action = match maybe_line {
                    Some(Ok(line)) => map_line_to_action(&line),
                    Some(Err(e)) => return Err(e.into()),
                    None => Some(Action::Quit),
                };
            }
        }

        if let Some(action) = action {
            app.update(action).await?;
        }

        if app.quit {
            break;
        }
    }

    Ok(())
}
