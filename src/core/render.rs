use crate::domain::model::{ChainId, ContractRecord, VersionPage};
use crate::utils::dedup::deduplicate;
use std::collections::BTreeMap;

/// Retired explorer hosts still present in registry data. Never linked.
pub const DEPRECATED_BLOCK_EXPLORERS: &[&str] = &[
    "https://ropsten.etherscan.io",
    "https://rinkeby.etherscan.io",
    "https://kovan-optimistic.etherscan.io",
    "https://stardust-explorer.metis.io",
    "https://blockexplorer.rinkeby.boba.network",
    "https://blockexplorer.bobabeam.boba.network",
    "https://rabbit.analogscan.com",
    "https://explorer.eurus.network",
    "https://testnetexplorer.eurus.network",
    "https://explorer.tst.publicmint.io",
    "https://evm-testnet.venidiumexplorer.com",
    "https://evm.venidiumexplorer.com",
    "https://evm.explorer.canto.io",
    "https://explorer.autobahn.network",
    "https://explorer.cascadia.foundation",
];

pub fn is_deprecated_explorer(url: &str) -> bool {
    DEPRECATED_BLOCK_EXPLORERS.contains(&url)
}

pub fn render_address(record: &ContractRecord) -> String {
    match record.block_explorer_url.as_deref() {
        Some(explorer) if !is_deprecated_explorer(explorer) => format!(
            "[{address}]({explorer}/address/{address})",
            address = record.address
        ),
        _ => record.address.clone(),
    }
}

pub fn render_contract_line(record: &ContractRecord) -> String {
    format!("- `{}.sol`: {}", record.name, render_address(record))
}

pub fn render_version_page(version: &str, records: &[&ContractRecord]) -> String {
    let mut networks: BTreeMap<ChainId, Option<&str>> = BTreeMap::new();
    for record in records {
        networks
            .entry(record.chain_id)
            .or_insert(record.chain_name.as_deref());
    }

    let sections: Vec<String> = networks
        .into_iter()
        .map(|(chain_id, chain_name)| {
            let heading = chain_name
                .map(str::to_string)
                .unwrap_or_else(|| chain_id.to_string());
            let lines: Vec<String> = records
                .iter()
                .filter(|record| record.chain_id == chain_id)
                .map(|record| render_contract_line(record))
                .collect();

            format!(
                "\n### {heading}\n\nThis network's chain ID is {chain_id}.\n\n{}\n",
                lines.join("\n")
            )
        })
        .collect();

    format!(
        "# {version}\n\nThis page lists the addresses of all the Safe contracts `{version}` grouped by chain.\n\n## Networks\n{}",
        sections.join("\n")
    )
}

/// One page per distinct version, in reverse discovery order.
pub fn render_pages(records: &[ContractRecord]) -> Vec<VersionPage> {
    let mut versions = deduplicate(records.iter().map(|record| record.version.as_str()));
    versions.reverse();

    versions
        .into_iter()
        .map(|version| {
            let version_records: Vec<&ContractRecord> = records
                .iter()
                .filter(|record| record.version == version)
                .collect();
            tracing::debug!(
                "Rendering {} with {} contract entries",
                version,
                version_records.len()
            );

            VersionPage {
                version: version.to_string(),
                content: render_version_page(version, &version_records),
            }
        })
        .collect()
}
