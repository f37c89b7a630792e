//! Static header: what the project does and how to use it.

use eframe::egui;

pub const TITLE: &str = "Sentence Compression Project";

pub const PURPOSE: &str = "This project takes a sentence and compresses it down to the main \
subject of the whole sentence. The output sentence must stay grammatically correct while \
keeping the information of the original. Compression like this can shrink large documents so \
they are quicker to search, or simply leave less text to read.";

pub const HOW_TO_TITLE: &str = "How to Use";

pub const HOW_TO: &str = "Enter a sentence of any length in the text box below and click \
Compress. The sentence is reduced to its main subject, and the output is expected to be \
grammatically correct. Removed words are struck through in red in the Compression panel; the \
Result panel shows only the words that were kept.";

pub fn show_header(ui: &mut egui::Ui) {
    ui.add_space(6.0);
    ui.heading(TITLE);
    ui.label(PURPOSE);
    ui.add_space(6.0);
    ui.label(egui::RichText::new(HOW_TO_TITLE).strong().size(16.0));
    ui.label(HOW_TO);
    ui.add_space(6.0);
}
