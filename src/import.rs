//! Image import.
//!
//! The upload control runs a single-shot task: pick a file, read it, decode
//! it. The task reports back over a oneshot channel that the UI polls once a
//! frame, so the draw-and-record step always happens on the UI thread.

use futures::channel::oneshot;
use image::RgbaImage;

use crate::error::ImportError;

/// File extensions offered by the picker and accepted on drop
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Outcome of a finished import task; `None` when no file was chosen
pub type ImportResult = Result<Option<RgbaImage>, ImportError>;

/// Decode an encoded image file into straight-alpha RGBA
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, ImportError> {
    let image = image::load_from_memory(bytes)?;
    log::debug!("Decoded image: {}x{}", image.width(), image.height());
    Ok(image.to_rgba8())
}

/// An upload in flight
pub struct PendingImport {
    receiver: oneshot::Receiver<ImportResult>,
}

impl PendingImport {
    /// Open the file picker in the background
    pub fn pick_file(ctx: &egui::Context) -> Self {
        let (sender, receiver) = oneshot::channel();
        let ctx = ctx.clone();
        spawn(move || async move {
            let result = pick_and_decode().await;
            if sender.send(result).is_err() {
                log::warn!("Image import finished after the editor went away");
            }
            ctx.request_repaint();
        });
        Self { receiver }
    }

    /// Wrap an existing receiver; the sending side delivers the result
    pub fn from_receiver(receiver: oneshot::Receiver<ImportResult>) -> Self {
        Self { receiver }
    }

    /// Check for completion without blocking
    pub fn poll(&mut self) -> Option<ImportResult> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(ImportError::Interrupted)),
        }
    }
}

async fn pick_and_decode() -> ImportResult {
    let Some(file) = rfd::AsyncFileDialog::new()
        .set_title("Upload image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .await
    else {
        log::debug!("No file selected");
        return Ok(None);
    };

    log::info!("Importing {}", file.file_name());
    let bytes = file.read().await;
    decode(&bytes).map(Some)
}

/// Run a task to completion off the UI thread. The future is built on the
/// worker thread, so only the closure needs to be `Send`.
#[cfg(not(target_arch = "wasm32"))]
fn spawn<F, Fut>(make_task: F)
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + 'static,
{
    std::thread::spawn(move || futures::executor::block_on(make_task()));
}

#[cfg(target_arch = "wasm32")]
fn spawn<F, Fut>(make_task: F)
where
    F: FnOnce() -> Fut + 'static,
    Fut: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(make_task());
}

/// Decode every image file dropped onto the window this frame
pub fn dropped_images(ctx: &egui::Context) -> Vec<RgbaImage> {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    dropped
        .iter()
        .filter(|file| is_image_file(file))
        .filter_map(|file| match read_dropped(file).and_then(|bytes| decode(&bytes)) {
            Ok(image) => Some(image),
            Err(err) => {
                log::error!("Failed to import dropped file {}: {}", file.name, err);
                None
            }
        })
        .collect()
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = match &file.path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => file.name.clone(),
    };
    has_image_extension(&name)
}

fn has_image_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn read_dropped(file: &egui::DroppedFile) -> Result<Vec<u8>, ImportError> {
    if let Some(bytes) = &file.bytes {
        return Ok(bytes.to_vec());
    }
    match &file.path {
        Some(path) => Ok(std::fs::read(path)?),
        None => Err(ImportError::Read(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "dropped file has no accessible data",
        ))),
    }
}
