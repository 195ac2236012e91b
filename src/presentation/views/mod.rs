mod markdown;
mod page;
mod renderer;

pub use markdown::render_markdown;
pub use page::{PageView, PanelView, UPLOAD_FIRST_MESSAGE, UploadView};
pub use renderer::PageRenderer;
