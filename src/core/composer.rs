//! Composer state and the submission controller.
//!
//! A [`Composer`] owns the draft text, the attachment queue, and the input
//! sizing state for one conversation view. The attached UI layer supplies
//! callbacks through [`ComposerSurface`] and [`SendHandler`]; user-visible
//! feedback flows out through the notice channel.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::upload::Uploader;
use crate::core::attachments::{Attachment, AttachmentQueue, FileSource};
use crate::core::constants::MOBILE_BREAKPOINT;
use crate::core::draft::{DraftStore, DraftStoreError};
use crate::core::message::{sanitize_messages, Message};
use crate::core::notice::NoticeSender;
use crate::core::sizing::{ContentMeasure, InputSizing};
use crate::utils::input::sanitize_draft_text;

pub const STREAMING_WAIT_NOTICE: &str = "Please wait for the model to finish its response!";
pub const EMPTY_DRAFT_NOTICE: &str = "Type a message before sending!";
pub const UPLOADS_PENDING_NOTICE: &str = "Hold on, files are still uploading!";

/// Everything the send operation needs for one outgoing message.
#[derive(Debug, Clone)]
pub struct SendRequest {
    pub text: String,
    pub attachments: Vec<Attachment>,
    pub cancel_token: CancellationToken,
}

/// Capabilities the composer needs from the hosting UI layer.
pub trait ComposerSurface {
    /// Replace the navigable location with the active conversation id,
    /// without a reload and without growing history.
    fn replace_location(&mut self, chat_id: &str);

    fn viewport_width(&self) -> u16;

    fn focus_input(&mut self);
}

/// Externally supplied send operation. Expected to be fire-and-forget: the
/// handler owns the streaming transport and reports completion back through
/// [`Composer::end_streaming`].
pub trait SendHandler {
    fn send(&mut self, request: SendRequest);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    Submitted,
    InsertNewline,
    Ignored,
}

pub struct Composer {
    draft: String,
    queue: AttachmentQueue,
    sizing: InputSizing,
    store: DraftStore,
    notices: NoticeSender,
    uploader: Arc<dyn Uploader>,
    is_streaming: bool,
    stream_interrupted: bool,
    stream_cancel_token: Option<CancellationToken>,
}

impl Composer {
    pub fn new(uploader: Arc<dyn Uploader>, store: DraftStore, notices: NoticeSender) -> Self {
        Self {
            draft: String::new(),
            queue: AttachmentQueue::new(),
            sizing: InputSizing::new(),
            store,
            notices,
            uploader,
            is_streaming: false,
            stream_interrupted: false,
            stream_cancel_token: None,
        }
    }

    /// Seed the draft at initialization.
    ///
    /// A value already rendered by the hosting framework takes precedence
    /// over the stored draft, so a restore that happened before this code
    /// ran is never overwritten. The winning value is mirrored back to the
    /// store and the input is sized to fit it.
    pub fn hydrate(
        &mut self,
        rendered: Option<&str>,
        measure: &dyn ContentMeasure,
    ) -> Result<(), DraftStoreError> {
        let stored = self.store.load()?;
        self.draft = rendered
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .or(stored)
            .unwrap_or_default();
        self.store.save(&self.draft)?;
        self.sizing.adjust_height(&self.draft, measure);
        Ok(())
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft text, mirror it to durable storage, and re-sync the
    /// input height. Call on every content change.
    pub fn set_draft(&mut self, text: &str, measure: &dyn ContentMeasure) {
        self.draft = sanitize_draft_text(text);
        if let Err(err) = self.store.save(&self.draft) {
            warn!(error = %err, "failed to persist draft");
        }
        self.sizing.adjust_height(&self.draft, measure);
    }

    pub fn height(&self) -> u16 {
        self.sizing.height()
    }

    pub fn attachments(&self) -> &[Attachment] {
        self.queue.attachments()
    }

    pub fn pending_uploads(&self) -> &[String] {
        self.queue.pending()
    }

    pub fn preview_count(&self) -> usize {
        self.queue.preview_count()
    }

    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        self.queue.remove_attachment(index)
    }

    /// Upload a batch of picked files.
    ///
    /// All names are recorded as pending before the first request is
    /// dispatched, every upload runs concurrently, and one failure never
    /// cancels its siblings. Successes land in input order; failures emit an
    /// error notice and contribute nothing. The pending list is cleared
    /// unconditionally once the whole batch settles.
    pub async fn upload_files(&mut self, files: Vec<FileSource>) {
        self.queue
            .begin_pending(files.iter().map(|file| file.name.clone()));
        debug!(count = files.len(), "dispatching upload batch");

        let uploader = Arc::clone(&self.uploader);
        let uploads = files.into_iter().map(|file| {
            let uploader = Arc::clone(&uploader);
            async move { uploader.upload(file).await }
        });
        let results = join_all(uploads).await;

        let mut completed = Vec::new();
        for result in results {
            match result {
                Ok(attachment) => completed.push(attachment),
                Err(err) => {
                    warn!(error = %err, "upload failed");
                    self.notices.error(err.notice_text());
                }
            }
        }
        self.queue.append_attachments(completed);
        self.queue.clear_pending();
    }

    /// Why submission is currently blocked, if it is.
    pub fn submit_blocker(&self) -> Option<&'static str> {
        if self.is_streaming {
            Some(STREAMING_WAIT_NOTICE)
        } else if self.draft.is_empty() {
            Some(EMPTY_DRAFT_NOTICE)
        } else if self.queue.has_pending() {
            Some(UPLOADS_PENDING_NOTICE)
        } else {
            None
        }
    }

    pub fn can_submit(&self) -> bool {
        self.submit_blocker().is_none()
    }

    /// Route an Enter keypress. Shift inserts a newline; a blocked composer
    /// warns instead of submitting; otherwise the form is submitted.
    pub fn handle_enter(
        &mut self,
        shift: bool,
        chat_id: &str,
        surface: &mut dyn ComposerSurface,
        handler: &mut dyn SendHandler,
    ) -> EnterOutcome {
        if shift {
            return EnterOutcome::InsertNewline;
        }
        if let Some(reason) = self.submit_blocker() {
            self.notices.warning(reason);
            return EnterOutcome::Ignored;
        }
        self.submit_form(chat_id, surface, handler);
        EnterOutcome::Submitted
    }

    /// Submit the current draft and attachments.
    ///
    /// Order matters: the location is updated first, the send operation gets
    /// the attachment list before it is cleared, then all transient state is
    /// reset. Wide viewports get input focus back; narrow ones are left
    /// alone so no on-screen keyboard pops up. Returns the cancellation
    /// token guarding the new stream.
    pub fn submit_form(
        &mut self,
        chat_id: &str,
        surface: &mut dyn ComposerSurface,
        handler: &mut dyn SendHandler,
    ) -> CancellationToken {
        surface.replace_location(chat_id);

        let cancel_token = self.begin_streaming();
        handler.send(SendRequest {
            text: self.draft.clone(),
            attachments: self.queue.take_attachments(),
            cancel_token: cancel_token.clone(),
        });

        self.draft.clear();
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear persisted draft");
        }
        self.sizing.reset_height();

        if surface.viewport_width() > MOBILE_BREAKPOINT {
            surface.focus_input();
        }
        cancel_token
    }

    /// Mark a new stream as active, cancelling any stream still in flight.
    pub fn begin_streaming(&mut self) -> CancellationToken {
        if let Some(token) = &self.stream_cancel_token {
            token.cancel();
        }
        let token = CancellationToken::new();
        self.stream_cancel_token = Some(token.clone());
        self.is_streaming = true;
        self.stream_interrupted = false;
        token
    }

    /// Called by the transport when a stream finishes normally.
    pub fn end_streaming(&mut self) {
        self.is_streaming = false;
        self.stream_cancel_token = None;
    }

    /// Abort the in-flight stream and strip partially-streamed artifacts
    /// from the transcript. In-flight uploads are not cancelled; only the
    /// message stream is.
    pub fn stop(&mut self, messages: &mut Vec<Message>) {
        if let Some(token) = &self.stream_cancel_token {
            token.cancel();
        }
        self.stream_cancel_token = None;
        self.is_streaming = false;
        self.stream_interrupted = true;
        sanitize_messages(messages);
    }

    pub fn is_streaming(&self) -> bool {
        self.is_streaming
    }

    pub fn stream_interrupted(&self) -> bool {
        self.stream_interrupted
    }
}
