/// Commands initiated by the UI (View -> Controller)
/// These are "requests" to perform actions.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    // --- Controls ---
    Capture,
    Reset,
    /// Open the native file picker and load the chosen image
    UploadImage,

    // --- Source prompt ---
    OpenSourcePrompt,
    /// Text typed into the prompt (index or URL)
    SubmitSource(String),
    CancelSourcePrompt,

    // --- Image area ---
    /// Click position relative to the image's top-left corner, in points
    ImageClicked { x: f32, y: f32 },

    // --- Dialogs ---
    DismissError,
}
