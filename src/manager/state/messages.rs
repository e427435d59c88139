//! Request bookkeeping and reply handling

use tracing::{debug, warn};

use super::{EditorState, PendingCall};
use crate::common::ipc::{ControlMessage, Notification, Reply, Request};

impl EditorState {
    /// Send a request whose reply updates `call`
    pub(super) fn invoke(&mut self, request: Request, call: PendingCall) {
        let id = self.port.invoke(request);
        self.pending.insert(id, call);
    }

    /// Send a fire-and-forget request
    pub(super) fn send(&self, request: Request) {
        self.port.send(request);
    }

    /// Ask for the note list, config, window hotkey and login-item state
    pub fn start(&mut self) {
        self.invoke(Request::GetNotes, PendingCall::LoadNotes { select: None });
        self.invoke(Request::GetConfig, PendingCall::LoadConfig);
        self.invoke(Request::GetGlobalHotkey, PendingCall::LoadHotkey);
        self.invoke(Request::GetAutoLaunch, PendingCall::LoadAutoLaunch);
    }

    /// Apply every reply and notification received so far
    ///
    /// Returns `true` once, when the first note list has arrived.
    pub fn poll(&mut self) -> bool {
        let mut first_load = false;

        for message in self.port.poll() {
            match message {
                ControlMessage::Reply { id, reply } => {
                    let Some(call) = self.pending.remove(&id) else {
                        warn!(id, "Reply for unknown request");
                        continue;
                    };

                    match (call, reply) {
                        (PendingCall::LoadNotes { select }, Reply::Notes(notes)) => {
                            self.apply_notes(notes, select.as_deref());
                            if !self.loaded {
                                self.loaded = true;
                                first_load = true;
                            }
                        }
                        (PendingCall::LoadConfig, Reply::Config(config)) => {
                            debug!(?config, "Config loaded");
                            self.config = config;
                        }
                        (PendingCall::LoadHotkey, Reply::Hotkey(hotkey)) => {
                            self.window_hotkey = hotkey;
                        }
                        (PendingCall::LoadAutoLaunch, Reply::AutoLaunch(enabled)) => {
                            self.auto_launch = enabled;
                        }
                        (PendingCall::Mutation(channel), Reply::Ack(ok)) => {
                            if !ok {
                                warn!(channel, "Request was not acknowledged");
                            }
                        }
                        (call, reply) => {
                            warn!(?call, ?reply, "Reply does not match request");
                        }
                    }
                }
                ControlMessage::Notify(Notification::AlwaysOnTopChanged(on_top)) => {
                    self.always_on_top = on_top;
                }
            }
        }

        first_load
    }
}
