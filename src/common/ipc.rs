//! Message channel between the note editor and the control service
//!
//! Requests flow UI → control, replies and notifications flow back. Each
//! direction is a FIFO `mpsc` channel with at-most-once delivery; a request
//! that expects an answer carries an id the reply echoes.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{Note, NoteUpdate, WindowConfig};

pub type RequestId = u64;

/// Operations the UI can invoke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "payload", rename_all = "kebab-case")]
pub enum Request {
    WindowMinimize,
    WindowMaximize,
    WindowClose,
    WindowToggleAlwaysOnTop,
    WindowSetOpacity(f64),
    GetNotes,
    SaveNote(NoteUpdate),
    DeleteNote(String),
    SetGlobalHotkey(String),
    GetGlobalHotkey,
    GetConfig,
    SetFontSize(i64),
    SetOpacity(f64),
    SetAutoLaunch(bool),
    GetAutoLaunch,
}

impl Request {
    /// Channel name used in logs
    pub fn channel_name(&self) -> &'static str {
        match self {
            Self::WindowMinimize => "window-minimize",
            Self::WindowMaximize => "window-maximize",
            Self::WindowClose => "window-close",
            Self::WindowToggleAlwaysOnTop => "window-toggle-always-on-top",
            Self::WindowSetOpacity(_) => "window-set-opacity",
            Self::GetNotes => "get-notes",
            Self::SaveNote(_) => "save-note",
            Self::DeleteNote(_) => "delete-note",
            Self::SetGlobalHotkey(_) => "set-global-hotkey",
            Self::GetGlobalHotkey => "get-global-hotkey",
            Self::GetConfig => "get-config",
            Self::SetFontSize(_) => "set-font-size",
            Self::SetOpacity(_) => "set-opacity",
            Self::SetAutoLaunch(_) => "set-auto-launch",
            Self::GetAutoLaunch => "get-auto-launch",
        }
    }

    /// Window chrome calls never produce a reply
    pub fn is_fire_and_forget(&self) -> bool {
        matches!(
            self,
            Self::WindowMinimize
                | Self::WindowMaximize
                | Self::WindowClose
                | Self::WindowToggleAlwaysOnTop
                | Self::WindowSetOpacity(_)
        )
    }
}

/// Answers to request/response calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Reply {
    Notes(Vec<Note>),
    /// `true` acknowledgement for mutating calls
    Ack(bool),
    Hotkey(String),
    Config(WindowConfig),
    AutoLaunch(bool),
}

/// Unsolicited control → UI messages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "payload", rename_all = "kebab-case")]
pub enum Notification {
    AlwaysOnTopChanged(bool),
}

/// A request as it travels to the control side
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// `None` for fire-and-forget calls
    pub id: Option<RequestId>,
    pub request: Request,
}

/// Everything the control side sends back
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMessage {
    Reply { id: RequestId, reply: Reply },
    Notify(Notification),
}

/// Create a connected pair of endpoints
pub fn channel() -> (UiPort, ControlPort) {
    let (request_tx, request_rx) = mpsc::channel();
    let (control_tx, control_rx) = mpsc::channel();
    (
        UiPort {
            tx: request_tx,
            rx: control_rx,
            next_id: 0,
        },
        ControlPort {
            rx: request_rx,
            tx: control_tx,
        },
    )
}

/// UI endpoint
#[derive(Debug)]
pub struct UiPort {
    tx: Sender<Envelope>,
    rx: Receiver<ControlMessage>,
    next_id: RequestId,
}

impl UiPort {
    /// Send a request that expects a reply; returns the id to match it with
    pub fn invoke(&mut self, request: Request) -> RequestId {
        self.next_id += 1;
        let id = self.next_id;
        let channel = request.channel_name();
        if self
            .tx
            .send(Envelope {
                id: Some(id),
                request,
            })
            .is_err()
        {
            warn!(channel, id, "Control service is gone, request dropped");
        }
        id
    }

    /// Send a fire-and-forget request
    pub fn send(&self, request: Request) {
        let channel = request.channel_name();
        debug_assert!(request.is_fire_and_forget(), "{channel} expects a reply");
        if self.tx.send(Envelope { id: None, request }).is_err() {
            warn!(channel, "Control service is gone, message dropped");
        }
    }

    /// Drain replies and notifications received so far, in arrival order
    pub fn poll(&self) -> Vec<ControlMessage> {
        self.rx.try_iter().collect()
    }
}

/// Control-service endpoint
#[derive(Debug)]
pub struct ControlPort {
    rx: Receiver<Envelope>,
    tx: Sender<ControlMessage>,
}

impl ControlPort {
    /// Requests queued since the last call, in send order
    pub fn pending(&self) -> Vec<Envelope> {
        self.rx.try_iter().collect()
    }

    pub fn reply(&self, id: RequestId, reply: Reply) {
        if self.tx.send(ControlMessage::Reply { id, reply }).is_err() {
            warn!(id, "Editor is gone, reply dropped");
        }
    }

    pub fn notify(&self, notification: Notification) {
        if self.tx.send(ControlMessage::Notify(notification)).is_err() {
            warn!(?notification, "Editor is gone, notification dropped");
        }
    }
}
