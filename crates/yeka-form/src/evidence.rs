//! Evidence staging for the report form.
//!
//! Selected files accumulate in an [`EvidenceSet`]. Images get a
//! preview handle whose lifetime controls the preview resource:
//! dropping the handle releases it, the way an object URL is revoked
//! when its thumbnail unmounts.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use yeka_core::EvidenceFile;

/// Broad file categories the uploader distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceKind {
    Image,
    Pdf,
    Document,
    Other,
}

impl EvidenceKind {
    pub fn classify(content_type: &str) -> Self {
        if content_type.starts_with("image/") {
            EvidenceKind::Image
        } else if content_type.contains("pdf") {
            EvidenceKind::Pdf
        } else if content_type.contains("msword") || content_type.contains("wordprocessingml") {
            EvidenceKind::Document
        } else {
            EvidenceKind::Other
        }
    }

    /// Catalog key for the badge shown in place of a thumbnail.
    /// Images render a preview instead, so they have no badge.
    pub fn badge_key(&self) -> Option<&'static str> {
        match self {
            EvidenceKind::Image => None,
            EvidenceKind::Pdf => Some("file.pdf"),
            EvidenceKind::Document => Some("file.doc"),
            EvidenceKind::Other => Some("file.file"),
        }
    }
}

/// Content type inferred from a file extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

/// Tracks live preview resources.
#[derive(Debug, Clone, Default)]
pub struct PreviewStore {
    inner: Arc<Mutex<HashMap<Uuid, String>>>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preview and hand back the owning handle.
    pub fn acquire(&self, file_name: &str) -> PreviewHandle {
        let id = Uuid::new_v4();
        let url = format!("preview://{}/{}", id.simple(), file_name);
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, url.clone());
        PreviewHandle {
            id,
            url,
            store: self.clone(),
        }
    }

    /// Number of previews not yet released.
    pub fn live(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Owns one preview resource; releases it on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    url: String,
    store: PreviewStore,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Ok(mut previews) = self.store.inner.lock() {
            previews.remove(&self.id);
        }
    }
}

/// One staged file with its kind and optional preview.
#[derive(Debug)]
pub struct StagedEvidence {
    pub file: EvidenceFile,
    pub kind: EvidenceKind,
    pub preview: Option<PreviewHandle>,
}

/// The files currently attached to the form.
#[derive(Debug, Default)]
pub struct EvidenceSet {
    staged: Vec<StagedEvidence>,
    store: PreviewStore,
}

impl EvidenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: PreviewStore) -> Self {
        Self {
            staged: Vec::new(),
            store,
        }
    }

    /// Stage newly selected files. Selection accumulates; it never
    /// replaces what is already attached.
    pub fn add_files(&mut self, files: Vec<EvidenceFile>) {
        for file in files {
            let kind = EvidenceKind::classify(&file.content_type);
            let preview = match kind {
                EvidenceKind::Image => Some(self.store.acquire(&file.file_name)),
                _ => None,
            };
            self.staged.push(StagedEvidence {
                file,
                kind,
                preview,
            });
        }
    }

    /// Detach one file. Its preview, if any, is released.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.staged.len() {
            self.staged.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.staged.clear();
    }

    /// Copies of the staged files, for payload assembly.
    pub fn files(&self) -> Vec<EvidenceFile> {
        self.staged.iter().map(|s| s.file.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedEvidence> {
        self.staged.iter()
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn store(&self) -> &PreviewStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> EvidenceFile {
        EvidenceFile::new(name, "image/png", vec![1, 2, 3])
    }

    fn pdf(name: &str) -> EvidenceFile {
        EvidenceFile::new(name, "application/pdf", vec![4, 5])
    }

    #[test]
    fn test_classification() {
        assert_eq!(EvidenceKind::classify("image/jpeg"), EvidenceKind::Image);
        assert_eq!(EvidenceKind::classify("application/pdf"), EvidenceKind::Pdf);
        assert_eq!(EvidenceKind::classify("application/msword"), EvidenceKind::Document);
        assert_eq!(
            EvidenceKind::classify(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            EvidenceKind::Document
        );
        assert_eq!(EvidenceKind::classify("text/plain"), EvidenceKind::Other);
    }

    #[test]
    fn test_badges() {
        assert_eq!(EvidenceKind::Image.badge_key(), None);
        assert_eq!(EvidenceKind::Pdf.badge_key(), Some("file.pdf"));
        assert_eq!(EvidenceKind::Other.badge_key(), Some("file.file"));
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for("scan.PDF"), "application/pdf");
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
        assert!(content_type_for("letter.docx").contains("wordprocessingml"));
        assert_eq!(content_type_for("notes"), "application/octet-stream");
    }

    #[test]
    fn test_selection_accumulates() {
        let mut set = EvidenceSet::new();
        set.add_files(vec![image("a.png")]);
        set.add_files(vec![pdf("b.pdf")]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.files()[0].file_name, "a.png");
    }

    #[test]
    fn test_only_images_get_previews() {
        let mut set = EvidenceSet::new();
        set.add_files(vec![image("a.png"), pdf("b.pdf"), image("c.png")]);

        assert_eq!(set.store().live(), 2);
        let previews: Vec<bool> = set.iter().map(|s| s.preview.is_some()).collect();
        assert_eq!(previews, vec![true, false, true]);
    }

    #[test]
    fn test_remove_releases_the_preview() {
        let mut set = EvidenceSet::new();
        set.add_files(vec![image("a.png"), image("b.png")]);
        assert_eq!(set.store().live(), 2);

        assert!(set.remove(0));
        assert_eq!(set.store().live(), 1);
        assert!(!set.remove(5));
    }

    #[test]
    fn test_clear_and_drop_release_everything() {
        let store = PreviewStore::new();
        {
            let mut set = EvidenceSet::with_store(store.clone());
            set.add_files(vec![image("a.png")]);
            set.clear();
            assert_eq!(store.live(), 0);

            set.add_files(vec![image("b.png")]);
            assert_eq!(store.live(), 1);
        }
        assert_eq!(store.live(), 0);
    }
}
