use tokio::sync::mpsc;

/// Severity of a user-visible notice. Notices are transient and dismissible;
/// none of them block continued use of the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Sender half handed to the composer; the UI layer drains the receiver.
#[derive(Clone)]
pub struct NoticeSender {
    tx: mpsc::UnboundedSender<Notice>,
}

pub fn notice_channel() -> (NoticeSender, mpsc::UnboundedReceiver<Notice>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NoticeSender { tx }, rx)
}

impl NoticeSender {
    pub fn info(&self, text: impl Into<String>) {
        let _ = self.tx.send(Notice::new(NoticeKind::Info, text));
    }

    pub fn warning(&self, text: impl Into<String>) {
        let _ = self.tx.send(Notice::new(NoticeKind::Warning, text));
    }

    pub fn error(&self, text: impl Into<String>) {
        let _ = self.tx.send(Notice::new(NoticeKind::Error, text));
    }
}
