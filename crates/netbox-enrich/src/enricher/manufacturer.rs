//! Manufacturer guess from a vendor string

use super::{Enricher, MANUFACTURERS_PATH};
use crate::matcher::BestMatch;
use crate::records::ManufacturerMatch;
use netbox_client::{paginate, FnVisitor};
use serde_json::Value;
use tracing::info;

impl Enricher {
    /// Best manufacturer for `oui` across the whole manufacturer list
    pub async fn match_manufacturer(&self, oui: &str) -> ManufacturerMatch {
        let mut matcher = BestMatch::new(oui);
        paginate(
            self.client(),
            MANUFACTURERS_PATH,
            &[],
            &mut FnVisitor(|manufacturer: Value| matcher.consider(&manufacturer)),
        )
        .await;

        let result = matcher.finish();
        info!("Matched \"{}\" to {} ({:.3})", oui, result.name, result.score);
        result
    }
}
