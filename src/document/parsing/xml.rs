//! Small helpers shared by the quick-xml readers

use quick_xml::events::BytesStart;

/// Unescaped value of an attribute, matched by its qualified name
pub(crate) fn attribute(element: &BytesStart, key: &[u8]) -> Option<String> {
    element
        .try_get_attribute(key)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

/// On/off property such as `<w:b/>` or `<w:i w:val="false"/>`
pub(crate) fn is_toggled_on(element: &BytesStart) -> bool {
    !matches!(
        attribute(element, b"w:val").as_deref(),
        Some("false" | "0" | "off")
    )
}
