//! Multipart bodies for collection creation and text generation.

use reqwest::multipart::{Form, Part};
use shared::protocol::{GenerationRequest, NewCollection};

use crate::error::{DeskError, DeskResult};

pub const PDF_FIELD: &str = "pdfs";
pub const TITLE_FIELD: &str = "title";
const PDF_MIME: &str = "application/pdf";

pub fn is_pdf_file_name(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("pdf"))
}

pub fn validate_new_collection(collection: &NewCollection) -> DeskResult<()> {
    if collection.title.trim().is_empty() {
        return Err(DeskError::Validation("Collection name is required".into()));
    }
    if collection.pdfs.is_empty() {
        return Err(DeskError::Validation("No PDF files provided".into()));
    }
    if let Some(invalid) = collection
        .pdfs
        .iter()
        .find(|pdf| !is_pdf_file_name(&pdf.file_name))
    {
        return Err(DeskError::Validation(format!(
            "Invalid file: {}",
            invalid.file_name
        )));
    }
    Ok(())
}

pub fn collection_form(collection: &NewCollection) -> DeskResult<Form> {
    validate_new_collection(collection)?;
    let mut form = Form::new().text(TITLE_FIELD, collection.title.clone());
    for pdf in &collection.pdfs {
        let part = Part::bytes(pdf.bytes.clone())
            .file_name(pdf.file_name.clone())
            .mime_str(PDF_MIME)?;
        form = form.part(PDF_FIELD, part);
    }
    Ok(form)
}

pub fn generation_form(request: &GenerationRequest) -> Form {
    request
        .form_fields()
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value))
}
