//! Field definitions, the schema trait and form rendering.

use std::collections::HashMap;

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::Div;

use crate::error::{FormError, Result, ValidationErrors};
use crate::validation::Validator;
use crate::widgets::{Widget, WidgetAttrs};

/// Definition of a form field.
pub struct FormFieldDef {
    /// Field name.
    pub name: String,
    /// Field label.
    pub label: String,
    /// The widget to render.
    pub widget: Box<dyn Widget>,
    /// Description rendered under the input.
    pub help_text: Option<String>,
    /// Validators, run in order.
    pub validators: Vec<Box<dyn Validator>>,
}

impl std::fmt::Debug for FormFieldDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormFieldDef")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("input_type", &self.widget.input_type())
            .field("help_text", &self.help_text)
            .field("validators", &self.validators.len())
            .finish_non_exhaustive()
    }
}

impl FormFieldDef {
    /// Creates a new field definition.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        widget: impl Widget + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            widget: Box::new(widget),
            help_text: None,
            validators: Vec::new(),
        }
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Runs every validator against `value` and collects the messages.
    pub fn check(&self, value: &str) -> Vec<String> {
        self.validators
            .iter()
            .filter_map(|validator| validator.validate(value).err())
            .collect()
    }
}

/// A typed record that can be parsed out of raw form values.
pub trait Schema: Sized {
    /// Returns the field definitions, in display order.
    fn fields() -> Vec<FormFieldDef>;

    /// Validates every field and coerces the raw values into `Self`.
    fn parse(data: &HashMap<String, String>) -> std::result::Result<Self, ValidationErrors>;

    /// Validates a single field in isolation, returning its messages.
    fn validate_field(name: &str, value: &str) -> Result<Vec<String>> {
        Self::fields()
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.check(value))
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }
}

/// Runs the validators of every field in `fields` against `data`.
///
/// Missing values are validated as the empty string.
pub fn validate_fields(fields: &[FormFieldDef], data: &HashMap<String, String>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in fields {
        let value = data.get(&field.name).map_or("", String::as_str);
        for message in field.check(value) {
            errors.add(&field.name, message);
        }
    }
    errors
}

/// Renders a form field with Bootstrap 5 styling.
pub fn render_bootstrap_field(
    field: &FormFieldDef,
    value: Option<&str>,
    errors: &[String],
) -> String {
    let id = format!("id_{}", field.name);
    let has_errors = !errors.is_empty();
    let label_text = &field.label;

    let mut attrs = WidgetAttrs::new();
    attrs.set("id", &id);
    if has_errors {
        attrs.set("class", "is-invalid");
    }

    let widget_html = field.widget.render(&field.name, value, &attrs);

    // The label turns red while the field holds an error.
    let label_el = if has_errors {
        html! {
            label.for_(#id).class("form-label text-danger") { #label_text }
        }
    } else {
        html! {
            label.for_(#id).class("form-label") { #label_text }
        }
    };

    let help_text = field.help_text.clone();

    html! { div.class("mb-3") }
        .raw(label_el.render())
        .raw(&widget_html)
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(help_text.as_deref().unwrap_or(""))
            })
        })
        .children(errors, |error, div: Element<Div>| {
            div.class("invalid-feedback").text(error)
        })
        .render()
}

/// Renders a complete form with a heading and Bootstrap 5 styling.
pub fn render_bootstrap_form(
    title: &str,
    fields: &[FormFieldDef],
    values: &HashMap<String, String>,
    errors: &ValidationErrors,
    action: &str,
    method: &str,
) -> String {
    let heading = html! {
        h1.class("text-center fw-bold") { #title }
    };

    let mut form = html! {
        form.action(#action).method(#method).class("mx-2")
    };

    for field in fields {
        let value = values.get(&field.name).map(String::as_str);
        let field_errors = errors
            .first(&field.name)
            .map(|message| vec![message.to_string()])
            .unwrap_or_default();
        let field_html = render_bootstrap_field(field, value, &field_errors);
        form = form.child::<Div, _>(|d| d.raw(&field_html));
    }

    form = form.child::<Div, _>(|d| {
        let btn = html! {
            button.type_("submit").class("btn btn-primary") {
                "Submit"
            }
        };
        d.raw(btn.render())
    });

    html! { div.class("register") }
        .raw(heading.render())
        .raw(form.render())
        .render()
}
