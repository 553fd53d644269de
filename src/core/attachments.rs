use serde::{Deserialize, Serialize};

use crate::api::UploadResponse;

/// A file picked by the user, not yet uploaded.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileSource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Normalized descriptor of a successfully uploaded file. Never mutated once
/// created; discarded when the user removes it or when the message is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    pub name: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

impl Attachment {
    pub fn from_response(response: UploadResponse) -> Self {
        let name = derive_name(&response.pathname);
        Self {
            url: response.url,
            name,
            content_type: response.content_type,
        }
    }
}

/// The attachment name is the final segment of the storage pathname.
fn derive_name(pathname: &str) -> String {
    pathname
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(pathname)
        .to_string()
}

/// Tracks in-flight upload filenames alongside completed attachments.
///
/// The pending list exists only for instant UI feedback: names go in the
/// moment files are selected and come out unconditionally once the whole
/// upload batch settles. Completed descriptors accumulate in input order.
#[derive(Debug, Clone, Default)]
pub struct AttachmentQueue {
    pending: Vec<String>,
    attachments: Vec<Attachment>,
}

impl AttachmentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of previews the UI should render right now.
    pub fn preview_count(&self) -> usize {
        self.attachments.len() + self.pending.len()
    }

    pub fn begin_pending(&mut self, names: impl IntoIterator<Item = String>) {
        self.pending.extend(names);
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn append_attachments(&mut self, attachments: impl IntoIterator<Item = Attachment>) {
        self.attachments.extend(attachments);
    }

    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        if index < self.attachments.len() {
            Some(self.attachments.remove(index))
        } else {
            None
        }
    }

    /// Drain the attachment list for an outgoing message.
    pub fn take_attachments(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.attachments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str) -> Attachment {
        Attachment {
            url: format!("https://blob.example/{name}"),
            name: name.to_string(),
            content_type: "image/png".to_string(),
        }
    }

    #[test]
    fn derive_name_takes_final_path_segment() {
        assert_eq!(derive_name("uploads/2024/photo.png"), "photo.png");
        assert_eq!(derive_name("photo.png"), "photo.png");
        assert_eq!(derive_name("uploads/dir/"), "dir");
    }

    #[test]
    fn preview_count_spans_pending_and_completed() {
        let mut queue = AttachmentQueue::new();
        queue.begin_pending(["a.png".to_string(), "b.png".to_string()]);
        assert_eq!(queue.preview_count(), 2);

        queue.append_attachments([attachment("a.png")]);
        assert_eq!(queue.preview_count(), 3);

        queue.clear_pending();
        assert_eq!(queue.preview_count(), 1);
    }

    #[test]
    fn take_attachments_drains_the_list() {
        let mut queue = AttachmentQueue::new();
        queue.append_attachments([attachment("a.png"), attachment("b.png")]);
        let taken = queue.take_attachments();
        assert_eq!(taken.len(), 2);
        assert!(queue.attachments().is_empty());
    }

    #[test]
    fn remove_attachment_ignores_out_of_range_index() {
        let mut queue = AttachmentQueue::new();
        queue.append_attachments([attachment("a.png")]);
        assert!(queue.remove_attachment(3).is_none());
        let removed = queue.remove_attachment(0).expect("attachment removed");
        assert_eq!(removed.name, "a.png");
        assert_eq!(queue.preview_count(), 0);
    }
}
