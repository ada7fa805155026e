// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = file` coverage.

use fz_contract::{Payload, PayloadCategory, PayloadValue, TypeTag};

/// Build the full `file` coverage set.
pub fn generate() -> Vec<Payload> {
    let mut out = Vec::new();

    out.push(Payload::new(
        PayloadValue::text("report.pdf"),
        TypeTag::File,
        PayloadCategory::Valid,
        "ordinary filename",
    ));

    out.push(
        Payload::new(
            PayloadValue::text("../../../../etc/passwd"),
            TypeTag::File,
            PayloadCategory::Upload,
            "path-traversal filename",
        )
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::text("invoice.pdf.exe"),
            TypeTag::File,
            PayloadCategory::Upload,
            "executable extension disguised as document",
        )
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::text("shell.php%00.jpg"),
            TypeTag::File,
            PayloadCategory::Upload,
            "MIME-disguised executable via null-byte truncation",
        )
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::Int(10_u32 as i64 * 1024 * 1024 * 1024),
            TypeTag::File,
            PayloadCategory::Boundary,
            "oversized size attribute (10 GiB)",
        )
        .boundary()
        .malicious(),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_traversal_filename_is_malicious() {
        let payloads = generate();
        assert!(payloads
            .iter()
            .any(|p| p.description.contains("path-traversal") && p.malicious));
    }
}
