use crate::models::LicenseRisk;

/// Classify a license string into a risk level.
///
/// Matching is case-insensitive since the Hub uses lowercase identifiers
/// (`apache-2.0`, `mit`) while GitHub uses canonical SPDX casing.
///
/// - `A OR B` (or `A/B`) takes the most permissive component
/// - `A AND B` takes the most restrictive component
/// - `WITH` exception clauses are ignored
/// - GitHub's `NOASSERTION` and the `"None"` placeholder are [`LicenseRisk::Unknown`]
pub fn classify(license: &str) -> LicenseRisk {
    let trimmed = license.trim();
    if trimmed.is_empty() {
        return LicenseRisk::Unknown;
    }

    let lower = normalize(trimmed).to_lowercase().replace('/', " or ");
    if lower.contains(" or ") {
        return lower
            .split(" or ")
            .map(classify_single)
            .min_by_key(permissive_rank)
            .unwrap_or(LicenseRisk::Unknown);
    }
    if lower.contains(" and ") {
        return lower
            .split(" and ")
            .map(classify_single)
            .max_by_key(restrictive_rank)
            .unwrap_or(LicenseRisk::Unknown);
    }
    classify_single(&lower)
}

fn classify_single(id: &str) -> LicenseRisk {
    let base = id.split(" with ").next().unwrap_or(id).trim();

    let non_commercial = base.split('-').any(|part| part == "nc");
    if base.contains("proprietary") || base.contains("commercial") || non_commercial {
        return LicenseRisk::Proprietary;
    }

    match base {
        "mit" | "mit-0" | "apache-2.0" | "bsd-2-clause" | "bsd-3-clause" | "bsd-3-clause-clear"
        | "isc" | "0bsd" | "unlicense" | "zlib" | "cc0-1.0" | "cc-by-4.0" | "cc-by-3.0"
        | "cc-by-sa-4.0" | "wtfpl" | "psf-2.0" | "python-2.0" | "bsl-1.0" | "artistic-2.0"
        | "afl-3.0" | "ecl-2.0" | "openrail" | "openrail++" | "bigscience-openrail-m"
        | "creativeml-openrail-m" => LicenseRisk::Permissive,

        "lgpl-2.1" | "lgpl-2.1-only" | "lgpl-2.1-or-later" | "lgpl-3.0" | "lgpl-3.0-only"
        | "lgpl-3.0-or-later" | "lgpl-lr" | "mpl-2.0" | "epl-1.0" | "epl-2.0" | "eupl-1.2"
        | "cddl-1.0" | "osl-3.0" | "llama2" | "llama3" | "llama3.1" | "gemma" => {
            LicenseRisk::WeakCopyleft
        }

        "gpl-2.0" | "gpl-2.0-only" | "gpl-2.0-or-later" | "gpl-3.0" | "gpl-3.0-only"
        | "gpl-3.0-or-later" | "agpl-3.0" | "agpl-3.0-only" | "agpl-3.0-or-later" | "eupl-1.1" => {
            LicenseRisk::StrongCopyleft
        }

        _ => LicenseRisk::Unknown,
    }
}

/// Map common long-form license names onto SPDX identifiers.
fn normalize(raw: &str) -> &str {
    match raw {
        "Apache 2.0" | "Apache License 2.0" | "Apache License, Version 2.0" => "Apache-2.0",
        "MIT License" | "The MIT License" => "MIT",
        "BSD License" | "New BSD" => "BSD-3-Clause",
        "Simplified BSD" => "BSD-2-Clause",
        "GNU General Public License v3.0" | "GPLv3" => "GPL-3.0",
        "GNU General Public License v2.0" | "GPLv2" => "GPL-2.0",
        "Mozilla Public License 2.0" => "MPL-2.0",
        other => other,
    }
}

fn permissive_rank(risk: &LicenseRisk) -> u8 {
    match risk {
        LicenseRisk::Permissive => 0,
        LicenseRisk::WeakCopyleft => 1,
        LicenseRisk::StrongCopyleft => 2,
        LicenseRisk::Proprietary => 3,
        LicenseRisk::Unknown => 4,
    }
}

fn restrictive_rank(risk: &LicenseRisk) -> u8 {
    match risk {
        LicenseRisk::Unknown => 0,
        LicenseRisk::Permissive => 1,
        LicenseRisk::WeakCopyleft => 2,
        LicenseRisk::StrongCopyleft => 3,
        LicenseRisk::Proprietary => 4,
    }
}
