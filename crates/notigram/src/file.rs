//! File message builder (documents, photos, audio, video, ...).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::client::Telegram;
use crate::error::Result;
use crate::payload::{HasPayload, ParseMode, Payload, PayloadBuilder, value_to_string};
use crate::sender::TelegramSender;

/// File kinds supported by the Bot API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    Document,
    Photo,
    Audio,
    Video,
    Animation,
    Voice,
    VideoNote,
    Sticker,
}

impl FileType {
    /// Form field name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Photo => "photo",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Animation => "animation",
            Self::Voice => "voice",
            Self::VideoNote => "video_note",
            Self::Sticker => "sticker",
        }
    }

    /// Bot API method that sends this kind.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Document => "sendDocument",
            Self::Photo => "sendPhoto",
            Self::Audio => "sendAudio",
            Self::Video => "sendVideo",
            Self::Animation => "sendAnimation",
            Self::Voice => "sendVoice",
            Self::VideoNote => "sendVideoNote",
            Self::Sticker => "sendSticker",
        }
    }
}

/// Where the file bytes come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Local file, uploaded as multipart/form-data.
    Path(PathBuf),
    /// HTTP URL or Telegram `file_id`, passed as an ordinary form field;
    /// Telegram fetches or reuses it server-side.
    Remote(String),
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for FileSource {
    fn from(remote: &str) -> Self {
        Self::Remote(remote.to_string())
    }
}

impl From<String> for FileSource {
    fn from(remote: String) -> Self {
        Self::Remote(remote)
    }
}

/// A file-sending builder: `sendDocument`, `sendPhoto`, `sendAudio`, ...
///
/// Caption supports Markdown by default. Local paths are uploaded as
/// multipart; URLs and `file_id`s ride along as plain fields.
#[derive(Debug, Clone)]
pub struct TelegramFile {
    payload: Payload,
    file_type: FileType,
    source: Option<FileSource>,
    filename: Option<String>,
}

impl TelegramFile {
    /// Create a file message with the given caption.
    pub fn new(caption: impl Into<String>) -> Self {
        let file = Self {
            payload: Payload::new(),
            file_type: FileType::Document,
            source: None,
            filename: None,
        };
        file.parse_mode(ParseMode::Markdown).content(caption)
    }

    /// Set the caption.
    pub fn content(mut self, caption: impl Into<String>) -> Self {
        self.payload.set("caption", Value::from(caption.into()));
        self
    }

    /// Attach a file of the given kind.
    pub fn file(mut self, source: impl Into<FileSource>, file_type: FileType) -> Self {
        self.file_type = file_type;
        self.source = Some(source.into());
        self
    }

    /// Upload filename override for local files.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Attach a document.
    pub fn document(self, source: impl Into<FileSource>) -> Self {
        self.file(source, FileType::Document)
    }

    /// Attach a photo.
    pub fn photo(self, source: impl Into<FileSource>) -> Self {
        self.file(source, FileType::Photo)
    }

    /// Attach an audio file.
    pub fn audio(self, source: impl Into<FileSource>) -> Self {
        self.file(source, FileType::Audio)
    }

    /// Attach a video.
    pub fn video(self, source: impl Into<FileSource>) -> Self {
        self.file(source, FileType::Video)
    }

    /// Attach an animation (GIF or soundless MP4).
    pub fn animation(self, source: impl Into<FileSource>) -> Self {
        self.file(source, FileType::Animation)
    }

    /// Attach a voice note (OGG/OPUS).
    pub fn voice(self, source: impl Into<FileSource>) -> Self {
        self.file(source, FileType::Voice)
    }

    /// Attach a video note.
    pub fn video_note(self, source: impl Into<FileSource>) -> Self {
        self.file(source, FileType::VideoNote)
    }

    /// Attach a sticker.
    pub fn sticker(self, source: impl Into<FileSource>) -> Self {
        self.file(source, FileType::Sticker)
    }

    /// Kind of the attached file.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Whether sending requires a multipart upload.
    pub fn is_multipart(&self) -> bool {
        matches!(self.source, Some(FileSource::Path(_)))
    }

    /// Payload including the remote source field, for form-encoded sends.
    pub(crate) fn to_params(&self) -> Map<String, Value> {
        let mut params = self.payload.as_map().clone();
        if let Some(FileSource::Remote(remote)) = &self.source {
            params.insert(
                self.file_type.as_str().to_string(),
                Value::from(remote.clone()),
            );
        }
        params
    }

    /// Build the multipart form: payload fields as text parts plus the file
    /// bytes under the kind's field name.
    pub(crate) async fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        for (key, value) in self.payload.as_map() {
            form = form.text(key.clone(), value_to_string(value));
        }

        if let Some(FileSource::Path(path)) = &self.source {
            let bytes = tokio::fs::read(path).await?;
            let filename = self
                .filename
                .clone()
                .or_else(|| {
                    path.file_name()
                        .and_then(|name| name.to_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| self.file_type.as_str().to_string());
            form = form.part(
                self.file_type.as_str().to_string(),
                Part::bytes(bytes).file_name(filename),
            );
        }

        Ok(form)
    }
}

impl HasPayload for TelegramFile {
    fn payload(&self) -> &Payload {
        &self.payload
    }

    fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }
}

#[async_trait]
impl TelegramSender for TelegramFile {
    async fn send(&self, client: &Telegram) -> Result<Value> {
        if self.is_multipart() {
            client
                .send_multipart(self.file_type.method(), self.to_form().await?)
                .await
        } else {
            client
                .send_request(self.file_type.method(), &self.to_params())
                .await
        }
    }
}
