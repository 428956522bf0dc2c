//! Multipart form bodies.

/// A file attached to a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// One multipart field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    File(FilePart),
}

/// An ordered multipart form. Names may repeat (`category`, `images`, ...)
/// and insertion order is kept on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    parts: Vec<(String, Part)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parts.push((name.into(), Part::Text(value.into())));
        self
    }

    /// Append one text field per value, all under the same name.
    pub fn texts<I, S>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.text(name, value);
        }
        self
    }

    /// Append a file field.
    pub fn file(&mut self, name: impl Into<String>, file: FilePart) -> &mut Self {
        self.parts.push((name.into(), Part::File(file)));
        self
    }

    pub fn parts(&self) -> &[(String, Part)] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<(String, Part)> {
        self.parts
    }

    /// First text value under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).into_iter().next()
    }

    /// Every text value under `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|(n, _)| n == name)
            .filter_map(|(_, part)| match part {
                Part::Text(text) => Some(text.as_str()),
                Part::File(_) => None,
            })
            .collect()
    }

    /// Every file under `name`, in order.
    pub fn files(&self, name: &str) -> Vec<&FilePart> {
        self.parts
            .iter()
            .filter(|(n, _)| n == name)
            .filter_map(|(_, part)| match part {
                Part::File(file) => Some(file),
                Part::Text(_) => None,
            })
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_fields_keep_order() {
        let mut form = FormData::new();
        form.text("title", "Shirt")
            .texts("category", ["a", "b"])
            .file("images", FilePart::new("front.jpg", "image/jpeg", vec![1, 2]));

        assert_eq!(form.len(), 4);
        assert_eq!(form.get("title"), Some("Shirt"));
        assert_eq!(form.get_all("category"), vec!["a", "b"]);
        assert_eq!(form.files("images")[0].file_name, "front.jpg");
        assert!(form.get("images").is_none());
        assert!(!form.contains("colors"));
    }
}
