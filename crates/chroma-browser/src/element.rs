//! Element-scoped reads: computed styles, text, markup and child counts.
//!
//! Every read runs a small function with `this` bound to the element. The
//! function first checks `isConnected` and throws a marker error for detached
//! nodes, so a node removed between query and read surfaces as
//! [`BrowserError::StaleElement`] rather than as stale data.
//!
//! Results travel back as primitives (strings and numbers). Object results
//! would need `returnByValue`, so style maps are `JSON.stringify`-ed in the
//! page and decoded here.

use crate::error::{BrowserError, Result, STALE_MARKER};
use chromiumoxide::element::Element;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A handle to a DOM element on a [`crate::Page`].
pub struct ElementRef {
    inner: Element,
}

impl ElementRef {
    pub(crate) fn new(inner: Element) -> Self {
        Self { inner }
    }

    /// Reads the computed values of `properties`, dropping empty ones.
    ///
    /// # Errors
    ///
    /// `StaleElement` for a detached node, `ScriptExecutionFailed` or `Json`
    /// for a failing or malformed round-trip.
    pub async fn computed_style(&self, properties: &[String]) -> Result<HashMap<String, String>> {
        let script = computed_style_script(properties)?;
        match self.call(&script).await? {
            Some(Value::String(payload)) => Ok(serde_json::from_str(&payload)?),
            other => Err(BrowserError::ScriptExecutionFailed(format!(
                "computed style returned {other:?}"
            ))),
        }
    }

    /// Returns the rendered text (`innerText`), which is empty for hidden elements.
    ///
    /// # Errors
    ///
    /// `StaleElement` for a detached node.
    pub async fn inner_text(&self) -> Result<String> {
        let value = self.call(&element_fn("return this.innerText || '';")).await?;
        Ok(value
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default())
    }

    /// Returns the element's serialized markup.
    ///
    /// # Errors
    ///
    /// `StaleElement` for a detached node.
    pub async fn outer_html(&self) -> Result<Option<String>> {
        let value = self.call(&element_fn("return this.outerHTML;")).await?;
        Ok(value.and_then(|v| v.as_str().map(str::to_owned)))
    }

    /// Returns the number of direct element children.
    ///
    /// # Errors
    ///
    /// `StaleElement` for a detached node.
    pub async fn child_count(&self) -> Result<usize> {
        let value = self.call(&element_fn("return this.children.length;")).await?;
        value
            .and_then(|v| v.as_u64())
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                BrowserError::ScriptExecutionFailed("child count was not a number".to_string())
            })
    }

    async fn call(&self, function_declaration: &str) -> Result<Option<Value>> {
        let returns = self
            .inner
            .call_js_fn(function_declaration, false)
            .await
            .map_err(BrowserError::from_element_call)?;

        if let Some(details) = returns.exception_details {
            let description = details
                .exception
                .as_ref()
                .and_then(|e| e.description.clone())
                .unwrap_or(details.text);
            return Err(BrowserError::from_script_exception(&description));
        }

        Ok(returns.result.value)
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("remote_object_id", &self.inner.remote_object_id)
            .finish()
    }
}

/// Wraps `body` in a function that refuses to run against a detached node.
fn element_fn(body: &str) -> String {
    format!(
        "function() {{ if (!this.isConnected) {{ throw new Error({marker:?}); }} {body} }}",
        marker = STALE_MARKER
    )
}

/// Builds the computed-style reader for an allow-list of properties.
///
/// The list is spliced in as a JSON array so property names can never break
/// out of the string literal.
fn computed_style_script(properties: &[String]) -> Result<String> {
    let relevant = serde_json::to_string(properties)?;
    Ok(element_fn(&format!(
        "var relevant = {relevant}; \
         var styles = window.getComputedStyle(this); \
         var styleMap = {{}}; \
         for (var i = 0; i < relevant.length; i++) {{ \
           var value = styles.getPropertyValue(relevant[i]); \
           if (value !== '' && value !== null) {{ styleMap[relevant[i]] = value; }} \
         }} \
         return JSON.stringify(styleMap);"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_fn_guards_detached_nodes() {
        let script = element_fn("return 1;");
        assert!(script.starts_with("function() {"));
        assert!(script.contains("this.isConnected"));
        assert!(script.contains(&format!("\"{STALE_MARKER}\"")));
        assert!(script.trim_end().ends_with("return 1; }"));
    }

    #[test]
    fn style_script_embeds_properties_as_json() {
        let props = vec!["color".to_string(), "background-color".to_string()];
        let script = computed_style_script(&props).unwrap();
        assert!(script.contains(r#"var relevant = ["color","background-color"];"#));
        assert!(script.contains("getComputedStyle(this)"));
        assert!(script.contains("JSON.stringify(styleMap)"));
    }

    #[test]
    fn style_script_escapes_hostile_property_names() {
        let props = vec![r#"color"]; alert('x'); //"#.to_string()];
        let script = computed_style_script(&props).unwrap();
        assert!(script.contains(r#"["color\"]; alert('x'); //"]"#));
    }
}
