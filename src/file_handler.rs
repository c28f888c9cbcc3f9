use eframe::egui;

/// An image file dropped onto the window, read into memory
#[derive(Debug, Clone)]
pub struct DroppedImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Collects image files dropped onto the window.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process any newly dropped files from the UI context
    /// Returns true if any new files were queued
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                false
            } else {
                self.dropped_files.extend(i.raw.dropped_files.iter().cloned());
                true
            }
        })
    }

    /// Drains the queue, returning the readable image files in drop order.
    pub fn take_images(&mut self) -> Vec<DroppedImage> {
        std::mem::take(&mut self.dropped_files)
            .into_iter()
            .filter_map(|file| {
                let name = file_name(&file);
                if !is_image_file(&file) {
                    log::warn!("Dropped file is not a supported type: {}", name);
                    return None;
                }
                let bytes = read_bytes(&file, &name)?;
                Some(DroppedImage { name, bytes })
            })
            .collect()
    }
}

fn file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = file
        .path
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.name.clone());
    has_image_extension(&name)
}

fn has_image_extension(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "tga"
    )
}

fn read_bytes(file: &egui::DroppedFile, name: &str) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        log::info!("Processing image from memory: {} ({} bytes)", name, bytes.len());
        return Some(bytes.to_vec());
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        log::info!("Processing image from path: {}", path.display());
        return match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::error!("Failed to read image file: {}: {}", path.display(), err);
                None
            }
        };
    }

    log::warn!("Dropped file has no readable contents: {}", name);
    None
}
