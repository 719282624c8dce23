//! CSV export: rows are built in memory and delivered through a Blob
//! object URL so the browser downloads them as a file.

use wasm_bindgen::JsCast;

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Header plus one line per row, every field double-quoted and
/// comma-joined. Embedded quotes are doubled.
pub fn build_csv(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        header
            .iter()
            .map(|h| quote(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            row.iter()
                .map(|f| quote(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Trigger a browser download of `csv` as `filename`. A missing window
/// or a blob failure is a silent no-op.
pub fn download_csv(filename: &str, csv: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(csv));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8;");
    let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options) else {
        return;
    };
    let Ok(object_url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };

    if let Ok(element) = document.create_element("a") {
        if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
            anchor.set_href(&object_url);
            anchor.set_download(filename);
            anchor.click();
        }
    }
    let _ = web_sys::Url::revoke_object_url(&object_url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_has_header_plus_one_line_per_row() {
        let rows = vec![
            vec!["2026-08-07".to_string(), "Kas".to_string(), "1500000".to_string()],
            vec!["2026-08-07".to_string(), "Bank".to_string(), "250000".to_string()],
            vec!["2026-08-06".to_string(), "Kas".to_string(), "75000".to_string()],
        ];
        let csv = build_csv(&["Tanggal", "Akun", "Nilai"], &rows);
        assert_eq!(csv.lines().count(), rows.len() + 1);
        assert_eq!(
            csv.lines().next().unwrap(),
            "\"Tanggal\",\"Akun\",\"Nilai\""
        );
    }

    #[test]
    fn fields_are_quoted_so_commas_survive() {
        let rows = vec![vec!["Pembelian bahan, curah".to_string(), "10".to_string()]];
        let csv = build_csv(&["Deskripsi", "Qty"], &rows);
        assert_eq!(csv.lines().nth(1).unwrap(), "\"Pembelian bahan, curah\",\"10\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let rows = vec![vec!["tinta \"hitam\"".to_string()]];
        let csv = build_csv(&["Deskripsi"], &rows);
        assert_eq!(csv.lines().nth(1).unwrap(), "\"tinta \"\"hitam\"\"\"");
    }

    #[test]
    fn empty_export_is_just_the_header() {
        let csv = build_csv(&["A", "B"], &[]);
        assert_eq!(csv, "\"A\",\"B\"");
    }
}
