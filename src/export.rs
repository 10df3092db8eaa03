//! PNG export: a save dialog on native, a browser download on the web.

use crate::error::ExportError;

/// File name offered for every download
pub const EXPORT_FILE_NAME: &str = "canvas-drawing.png";

/// Hand an encoded PNG to the user.
///
/// Returns `Ok(false)` when the user dismissed the save dialog.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(png: &[u8]) -> Result<bool, ExportError> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Download PNG")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("PNG Image", &["png"])
        .save_file()
    else {
        return Ok(false);
    };

    std::fs::write(&path, png)?;
    log::info!("Exported PNG to {}", path.display());
    Ok(true)
}

/// Hand an encoded PNG to the user.
#[cfg(target_arch = "wasm32")]
pub fn save_png(png: &[u8]) -> Result<bool, ExportError> {
    use wasm_bindgen::JsCast as _;

    let browser = |err: wasm_bindgen::JsValue| ExportError::Browser(format!("{:?}", err));

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;

    let bytes = js_sys::Uint8Array::from(png);
    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(browser)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser)?;

    let anchor = document
        .create_element("a")
        .map_err(browser)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Browser("created element is not an anchor".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(EXPORT_FILE_NAME);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(browser)?;
    log::info!("Exported PNG ({} bytes)", png.len());
    Ok(true)
}
