//! Federal filing forms by business entity type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    SoleProprietor,
    SingleMemberLlc,
    MultiMemberLlc,
    Partnership,
    SCorp,
    CCorp,
}

impl FromStr for EntityType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "sole" | "soleprop" | "soleproprietor" | "soleproprietorship" | "individual" => {
                Ok(EntityType::SoleProprietor)
            }
            "llc" | "smllc" | "singlememberllc" => Ok(EntityType::SingleMemberLlc),
            "mmllc" | "multimemberllc" => Ok(EntityType::MultiMemberLlc),
            "partnership" | "gp" | "lp" | "llp" => Ok(EntityType::Partnership),
            "scorp" | "scorporation" => Ok(EntityType::SCorp),
            "ccorp" | "ccorporation" | "corporation" => Ok(EntityType::CCorp),
            _ => Err(anyhow::anyhow!("unknown entity type: {s}")),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityType::SoleProprietor => "Sole proprietor",
            EntityType::SingleMemberLlc => "Single-member LLC",
            EntityType::MultiMemberLlc => "Multi-member LLC",
            EntityType::Partnership => "Partnership",
            EntityType::SCorp => "S corporation",
            EntityType::CCorp => "C corporation",
        };
        f.write_str(s)
    }
}

impl EntityType {
    /// Annual federal return forms.
    pub fn tax_forms(&self) -> &'static [&'static str] {
        match self {
            // Single-member LLCs are disregarded entities by default.
            EntityType::SoleProprietor | EntityType::SingleMemberLlc => {
                &["Form 1040", "Schedule C", "Schedule SE"]
            }
            EntityType::MultiMemberLlc | EntityType::Partnership => {
                &["Form 1065", "Schedule K-1 (Form 1065)"]
            }
            EntityType::SCorp => &["Form 1120-S", "Schedule K-1 (Form 1120-S)"],
            EntityType::CCorp => &["Form 1120"],
        }
    }

    pub fn estimated_tax_form(&self) -> &'static str {
        match self {
            EntityType::CCorp => "Form 1120-W",
            _ => "Form 1040-ES",
        }
    }

    /// Whether owners' business income is subject to self-employment tax.
    pub fn owes_self_employment_tax(&self) -> bool {
        matches!(
            self,
            EntityType::SoleProprietor
                | EntityType::SingleMemberLlc
                | EntityType::MultiMemberLlc
                | EntityType::Partnership
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!("Sole Proprietor".parse::<EntityType>().unwrap(), EntityType::SoleProprietor);
        assert_eq!("single-member LLC".parse::<EntityType>().unwrap(), EntityType::SingleMemberLlc);
        assert_eq!("S-Corp".parse::<EntityType>().unwrap(), EntityType::SCorp);
        assert_eq!("C corporation".parse::<EntityType>().unwrap(), EntityType::CCorp);
        assert!("trust".parse::<EntityType>().is_err());
    }

    #[test]
    fn forms() {
        assert_eq!(
            EntityType::SoleProprietor.tax_forms(),
            &["Form 1040", "Schedule C", "Schedule SE"]
        );
        assert_eq!(EntityType::SCorp.tax_forms()[0], "Form 1120-S");
        assert_eq!(EntityType::CCorp.estimated_tax_form(), "Form 1120-W");
        assert!(!EntityType::SCorp.owes_self_employment_tax());
        assert!(EntityType::Partnership.owes_self_employment_tax());
    }
}
