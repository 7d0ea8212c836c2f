// src/images.rs
// One-off fetcher for the legacy club site's images (logos, sponsors, news
// banners). Each download stands alone: a failed item is reported and the
// rest continue.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::warn;

pub struct Asset {
    /// Subdirectory under the target root.
    pub dir: &'static str,
    /// Explicit file name; `None` takes the URL's last path segment.
    pub name: Option<&'static str>,
    pub url: &'static str,
}

pub const ASSETS: &[Asset] = &[
    Asset { dir: "logos", name: None, url: "https://www.crazy-geese.at/wp-content/uploads/2018/02/R.png" },
    Asset { dir: "logos", name: None, url: "https://www.crazy-geese.at/wp-content/uploads/2016/04/cropped-logo_720_316.png" },
    Asset { dir: "logos", name: None, url: "https://www.crazy-geese.at/wp-content/uploads/2013/04/cropped-cropped-HP-Logo-Final.jpg" },
    Asset { dir: "sponsoren", name: Some("kutro.png"), url: "https://www.crazy-geese.at/wp-content/uploads/2017/05/kutro.png" },
    Asset { dir: "sponsoren", name: Some("fielders-choice.png"), url: "https://www.crazy-geese.at/wp-content/uploads/2019/08/fc.png" },
    Asset { dir: "sponsoren", name: Some("wstv.jpg"), url: "https://www.crazy-geese.at/wp-content/uploads/2024/10/1_WSTV_Logo-300x186.jpg" },
    Asset { dir: "sponsoren", name: Some("energy3000.png"), url: "https://www.crazy-geese.at/wp-content/uploads/2023/05/9737.png" },
    Asset { dir: "sponsoren", name: Some("ehrnhoefer.png"), url: "https://www.crazy-geese.at/wp-content/uploads/2023/05/ernhoefer.png" },
    Asset { dir: "sponsoren", name: Some("sipconnect.jpeg"), url: "https://www.crazy-geese.at/wp-content/uploads/2023/05/sipconnect.jpeg" },
    Asset { dir: "sponsoren", name: Some("arteks.png"), url: "https://www.crazy-geese.at/wp-content/uploads/2017/05/arteks.png" },
    Asset { dir: "sponsoren", name: Some("zeus.jpeg"), url: "https://www.crazy-geese.at/wp-content/uploads/2021/09/zeus-300x182.jpeg" },
    Asset { dir: "sponsoren", name: Some("pannonia-eagles.jpg"), url: "https://www.crazy-geese.at/wp-content/uploads/2016/11/eagles.jpg" },
    Asset { dir: "sponsoren", name: Some("pusitz-bau.jpg"), url: "https://www.crazy-geese.at/wp-content/uploads/2013/03/pusitz-bau.jpg" },
    Asset { dir: "sponsoren", name: Some("bank-burgenland.jpg"), url: "https://www.crazy-geese.at/wp-content/uploads/2013/03/bank-burgenland.jpg" },
    Asset { dir: "sponsoren", name: Some("generali.jpg"), url: "https://www.crazy-geese.at/wp-content/uploads/2013/03/generali.jpg" },
    Asset { dir: "sonstige", name: None, url: "https://www.crazy-geese.at/wp-content/uploads/2013/03/lust_auf_baseball_neu1.jpg" },
    Asset { dir: "sonstige", name: None, url: "https://www.crazy-geese.at/wp-content/uploads/2024/06/images.jpg" },
    Asset { dir: "sonstige", name: None, url: "https://www.crazy-geese.at/wp-content/uploads/2013/04/FacebookLogo-300x99.png" },
    Asset { dir: "news", name: None, url: "https://www.crazy-geese.at/wp-content/uploads/2022/07/slide_baseball-1140x855.jpeg" },
    Asset { dir: "news", name: None, url: "https://www.crazy-geese.at/wp-content/uploads/2022/06/banner-1140x387.png" },
    Asset { dir: "news", name: None, url: "https://www.crazy-geese.at/wp-content/uploads/2022/06/2022_06_12_cubs-1140x769.png" },
];

impl Asset {
    pub fn file_name(&self) -> &str {
        match self.name {
            Some(name) => name,
            None => self.url.rsplit('/').next().unwrap_or("unnamed"),
        }
    }
}

pub struct FetchTally {
    pub ok: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Download every asset under `root`, keeping what already exists.
pub fn download_all(root: &Path) -> Result<FetchTally, Box<dyn Error>> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .timeout(Duration::from_secs(30))
        .build()?;

    let mut tally = FetchTally { ok: 0, failed: 0, skipped: 0 };
    for asset in ASSETS {
        let dir = root.join(asset.dir);
        fs::create_dir_all(&dir)?;
        let target = dir.join(asset.file_name());
        if target.exists() {
            tally.skipped += 1;
            continue;
        }
        match fetch(&client, asset.url) {
            Ok(bytes) => {
                fs::write(&target, bytes)?;
                println!("  [OK] {}", target.display());
                tally.ok += 1;
            }
            Err(e) => {
                warn!("{}: {e}", asset.url);
                println!("  [FAILED] {} ({e})", asset.url);
                tally.failed += 1;
            }
        }
    }
    Ok(tally)
}

fn fetch(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let resp = client.get(url).send()?;
    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status()).into());
    }
    Ok(resp.bytes()?.to_vec())
}
