use async_trait::async_trait;
use shared::domain::{Control, Element, TextSlot};

/// Rendering capabilities the workflow controller drives. Implementations
/// own presentation only; every decision about what to show lives in the
/// controller.
#[async_trait]
pub trait UiSurface: Send + Sync {
    fn show(&self, element: Element);
    fn hide(&self, element: Element);
    fn set_text(&self, slot: TextSlot, text: &str);
    fn set_enabled(&self, control: Control, enabled: bool);
    fn set_label(&self, control: Control, label: &str);
    /// Replaces the selectable company list. The placeholder entry is implied.
    fn set_company_options(&self, names: &[String]);
    /// Blocking user notice.
    fn notify(&self, message: &str);
    /// Yes/no prompt; `false` when declined or unanswerable.
    async fn confirm(&self, prompt: &str) -> bool;
}
