// src/core/browser.rs
// Capability surface over the rendering browser. The pipeline only ever
// needs these few operations; everything takes `&dyn Surface` so tests can
// script page content without Chrome on the machine.

use std::error::Error;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use log::debug;

/// One `<option>` of a select element.
#[derive(Clone, Debug)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

pub trait Surface {
    /// Navigate and block until the page has settled (navigation complete
    /// plus a fixed render delay; the site fills the DOM client-side).
    fn goto(&self, url: &str) -> Result<(), Box<dyn Error>>;

    /// Full visible text of the document body.
    fn body_text(&self) -> Result<String, Box<dyn Error>>;

    /// Current DOM serialized back to HTML.
    fn html(&self) -> Result<String, Box<dyn Error>>;

    /// Value/label pairs for every element matching `selector`.
    fn options(&self, selector: &str) -> Result<Vec<SelectOption>, Box<dyn Error>>;

    /// Number of elements matching `selector`.
    fn count(&self, selector: &str) -> Result<usize, Box<dyn Error>>;

    /// Click the nth element matching `selector`.
    fn click_nth(&self, selector: &str, index: usize) -> Result<(), Box<dyn Error>>;

    /// Fixed-duration pause.
    fn pause(&self, ms: u64);
}

/// Production surface: one tab of a headless Chromium.
pub struct ChromeSurface {
    // Dropping the Browser kills the child process; keep it alive as long
    // as the tab is in use.
    _browser: Browser,
    tab: Arc<Tab>,
    settle_ms: u64,
}

impl ChromeSurface {
    pub fn launch(settle_ms: u64) -> Result<Self, Box<dyn Error>> {
        let opts = LaunchOptions::default_builder().headless(true).build()?;
        let browser = Browser::new(opts)?;
        let tab = browser.new_tab()?;
        Ok(Self { _browser: browser, tab, settle_ms })
    }
}

impl Surface for ChromeSurface {
    fn goto(&self, url: &str) -> Result<(), Box<dyn Error>> {
        debug!("goto {url}");
        self.tab.navigate_to(url)?;
        self.tab.wait_until_navigated()?;
        thread::sleep(Duration::from_millis(self.settle_ms));
        Ok(())
    }

    fn body_text(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.tab.find_element("body")?.get_inner_text()?)
    }

    fn html(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.tab.get_content()?)
    }

    fn options(&self, selector: &str) -> Result<Vec<SelectOption>, Box<dyn Error>> {
        let mut out = Vec::new();
        // find_elements errors on zero matches; treat that as an empty list.
        let elements = self.tab.find_elements(selector).unwrap_or_default();
        for el in elements {
            let label = el.get_inner_text()?.trim().to_string();
            let value = el
                .get_attribute_value("value")?
                .unwrap_or_default();
            out.push(SelectOption { value, label });
        }
        Ok(out)
    }

    fn count(&self, selector: &str) -> Result<usize, Box<dyn Error>> {
        Ok(self.tab.find_elements(selector).map(|v| v.len()).unwrap_or(0))
    }

    fn click_nth(&self, selector: &str, index: usize) -> Result<(), Box<dyn Error>> {
        let elements = self.tab.find_elements(selector)?;
        let el = elements
            .get(index)
            .ok_or_else(|| format!("no element #{index} for selector {selector}"))?;
        el.click()?;
        Ok(())
    }

    fn pause(&self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}
