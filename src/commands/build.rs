//! Build the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Site;

/// Build the site for `host`; defaults to the host of the configured URL
pub fn run(site: &Site, host: Option<&str>) -> Result<()> {
    let host = host.unwrap_or_else(|| site.config.default_host());
    let generator = Generator::new(site, host);

    tracing::info!(
        "Building for host {} (base url {:?})",
        host,
        generator.build_info().base_url
    );

    let routes = generator.generate()?;
    println!(
        "Built {} pages into {}",
        routes.len(),
        site.public_dir.display()
    );
    Ok(())
}
