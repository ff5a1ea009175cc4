//! `/columns` and `/analyze` over `fetch`
//!
//! Both calls post a `FormData` body. Failures come back as the detail text
//! the session turns into the inline error: the response body for non-2xx
//! answers, the JS error message for transport failures.

use patent_analysis_common::api::{parse_analysis_response, parse_columns_response, FIELD_FILE};
use patent_analysis_common::{AnalysisPage, AnalyzeRequest, Endpoint};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

fn js_error_text(value: JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn file_form(file: &File) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename(FIELD_FILE, file, &file.name())?;
    Ok(form)
}

async fn post_form(url: &str, form: &FormData) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error_text)?;
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error_text)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error_text)?;

    let text_promise = resp.text().map_err(js_error_text)?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(js_error_text)?
        .as_string()
        .unwrap_or_default();

    if resp.ok() {
        Ok(body)
    } else {
        gloo::console::error!(format!("{} returned {}", url, resp.status()));
        Err(body)
    }
}

/// `POST /columns`
pub async fn fetch_columns(base: &str, file: &File) -> Result<Vec<String>, String> {
    let form = file_form(file).map_err(js_error_text)?;
    let body = post_form(&Endpoint::Columns.url(base), &form).await?;

    parse_columns_response(&body).map_err(|e| e.to_string())?
}

/// `POST /analyze`
pub async fn analyze(base: &str, request: &AnalyzeRequest<File>) -> Result<AnalysisPage, String> {
    let form = file_form(&request.file).map_err(js_error_text)?;
    for (name, value) in request.form_fields() {
        form.append_with_str(name, value).map_err(js_error_text)?;
    }
    let body = post_form(&Endpoint::Analyze.url(base), &form).await?;

    parse_analysis_response(&body).map_err(|e| e.to_string())
}
