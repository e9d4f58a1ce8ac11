//! Binding message formatting seam
//!
//! Conversion faults (format, overflow) are not stored verbatim. The store
//! asks a caller-owned [`BindingMessageProvider`] for a user-facing message
//! built from the field's display name and attempted value, and records
//! that string instead. Localization stays with the caller.

/// Renders user-facing messages for values that failed conversion.
pub trait BindingMessageProvider {
    /// Entry exists and the field has a name.
    fn attempted_value_is_invalid(&self, attempted_value: &str, name: &str) -> String;

    /// Entry exists but the field has no name (a parameter or element).
    fn non_property_attempted_value_is_invalid(&self, attempted_value: &str) -> String;

    /// No entry was recorded, but the field has a name.
    fn unknown_value_is_invalid(&self, name: &str) -> String;

    /// No entry and no name.
    fn non_property_unknown_value_is_invalid(&self) -> String;
}

/// English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBindingMessages;

impl BindingMessageProvider for DefaultBindingMessages {
    fn attempted_value_is_invalid(&self, attempted_value: &str, name: &str) -> String {
        format!("The value '{attempted_value}' is not valid for {name}.")
    }

    fn non_property_attempted_value_is_invalid(&self, attempted_value: &str) -> String {
        format!("The value '{attempted_value}' is not valid.")
    }

    fn unknown_value_is_invalid(&self, name: &str) -> String {
        format!("The supplied value is invalid for {name}.")
    }

    fn non_property_unknown_value_is_invalid(&self) -> String {
        "The supplied value is invalid.".to_string()
    }
}

/// What the store needs to know about a field to render a conversion message.
#[derive(Clone, Copy)]
pub struct FieldMetadata<'a> {
    /// Name shown to users. Preferred over `property_name`.
    pub display_name: Option<&'a str>,
    /// Declared property name, if the field is a property.
    pub property_name: Option<&'a str>,
    /// Message renderer.
    pub messages: &'a dyn BindingMessageProvider,
}

impl<'a> FieldMetadata<'a> {
    /// Metadata for an unnamed field.
    pub fn new(messages: &'a dyn BindingMessageProvider) -> Self {
        Self {
            display_name: None,
            property_name: None,
            messages,
        }
    }

    /// Set the display name.
    pub fn display_name(mut self, name: &'a str) -> Self {
        self.display_name = Some(name);
        self
    }

    /// Set the property name.
    pub fn property_name(mut self, name: &'a str) -> Self {
        self.property_name = Some(name);
        self
    }

    /// Display name, falling back to property name.
    pub fn name(&self) -> Option<&'a str> {
        self.display_name.or(self.property_name)
    }

    /// Message for a value that failed conversion.
    ///
    /// `attempted_value` is `None` when no entry exists for the field, and
    /// the entry's attempted text (possibly empty) otherwise.
    pub fn invalid_value_message(&self, attempted_value: Option<&str>) -> String {
        match (attempted_value, self.name()) {
            (None, None) => self.messages.non_property_unknown_value_is_invalid(),
            (None, Some(name)) => self.messages.unknown_value_is_invalid(name),
            (Some(value), None) => self.messages.non_property_attempted_value_is_invalid(value),
            (Some(value), Some(name)) => self.messages.attempted_value_is_invalid(value, name),
        }
    }
}

impl std::fmt::Debug for FieldMetadata<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldMetadata")
            .field("display_name", &self.display_name)
            .field("property_name", &self.property_name)
            .finish_non_exhaustive()
    }
}
