//! Accounts, transactions, and postings as hledger-web reports them.
//!
//! These are read-only value records decoded from the backend's JSON.
//! The serde renames mirror hledger's field names exactly (including the
//! trailing underscores hledger uses for lazily-computed fields).

use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

use crate::amount::{Amount, Commodity};
use crate::mixed::MixedAmount;
use crate::quantity::Quantity;

/// A journal tag: name and value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag(pub String, pub String);

/// Colon-separated account path, e.g. `assets:bank:checking`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountName(String);

impl AccountName {
    /// The last path segment.
    pub fn basename(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or(&self.0)
    }

    /// True when `other` sits strictly below this account in the tree.
    pub fn is_parent_of(&self, other: &AccountName) -> bool {
        other
            .0
            .strip_prefix(&self.0)
            .is_some_and(|tail| tail.starts_with(':'))
    }

    /// All ancestors, outermost first.
    pub fn parents(&self) -> Vec<Self> {
        self.0
            .match_indices(':')
            .map(|(index, _)| Self(self.0[..index].to_string()))
            .collect()
    }

    pub fn parent(&self) -> Option<Self> {
        self.0
            .rfind(':')
            .map(|index| Self(self.0[..index].to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseAccountNameError {
    #[error("must not be empty")]
    Empty,
}

impl FromStr for AccountName {
    type Err = ParseAccountNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseAccountNameError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDeclarationInfo {
    #[serde(rename = "adicomment")]
    pub comment: String,
    #[serde(rename = "aditags")]
    pub tags: Vec<Tag>,
    #[serde(rename = "adideclarationorder")]
    pub declaration_order: usize,
}

/// One node of the accounts tree, with its balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "aname")]
    pub name: AccountName,
    #[serde(rename = "adeclarationinfo")]
    pub declaration_info: Option<AccountDeclarationInfo>,
    #[serde(rename = "asubs_")]
    pub subaccounts: Vec<AccountName>,
    #[serde(rename = "aparent_")]
    pub parent: AccountName,
    #[serde(rename = "aboring")]
    pub boring: bool,
    #[serde(rename = "anumpostings")]
    pub num_postings: usize,
    #[serde(rename = "aebalance")]
    pub balance_excluding_subaccounts: MixedAmount,
    #[serde(rename = "aibalance")]
    pub balance_including_subaccounts: MixedAmount,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePosition {
    #[serde(rename = "sourceLine")]
    pub line: usize,
    #[serde(rename = "sourceColumn")]
    pub column: usize,
    #[serde(rename = "sourceName")]
    pub file_name: PathBuf,
}

pub type SourceRange = (SourcePosition, SourcePosition);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Unmarked,
    Pending,
    Cleared,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PostingType {
    #[serde(rename = "RegularPosting")]
    #[default]
    Regular,
    #[serde(rename = "VirtualPosting")]
    Virtual,
    #[serde(rename = "BalancedVirtualPosting")]
    BalancedVirtual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceAssertion {
    #[serde(rename = "baamount")]
    pub amount: Amount,
    #[serde(rename = "batotal")]
    pub total: bool,
    #[serde(rename = "bainclusive")]
    pub inclusive: bool,
    #[serde(rename = "baposition")]
    pub position: SourcePosition,
}

/// One line of a transaction: an amount assigned to an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Posting {
    #[serde(rename = "pdate")]
    pub date: Option<chrono::NaiveDate>,
    #[serde(rename = "pdate2")]
    pub date2: Option<chrono::NaiveDate>,
    #[serde(rename = "pstatus")]
    pub status: Status,
    #[serde(rename = "paccount")]
    pub account: AccountName,
    #[serde(rename = "pamount")]
    pub amount: MixedAmount,
    #[serde(rename = "pcomment")]
    pub comment: String,
    #[serde(rename = "ptype")]
    pub posting_type: PostingType,
    #[serde(rename = "ptags")]
    pub tags: Vec<Tag>,
    #[serde(rename = "pbalanceassertion")]
    pub balance_assertion: Option<BalanceAssertion>,
    #[serde(rename = "ptransaction_", default)]
    pub transaction: Option<usize>,
    #[serde(rename = "poriginal")]
    pub original: Option<Box<Posting>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "tindex")]
    pub index: usize,
    #[serde(rename = "tprecedingcomment")]
    pub preceding_comment: String,
    #[serde(rename = "tsourcepos")]
    pub source_position: SourceRange,
    #[serde(rename = "tdate")]
    pub date: chrono::NaiveDate,
    #[serde(rename = "tdate2")]
    pub date2: Option<chrono::NaiveDate>,
    #[serde(rename = "tstatus")]
    pub status: Status,
    #[serde(rename = "tcode")]
    pub code: String,
    #[serde(rename = "tdescription")]
    pub description: String,
    #[serde(rename = "tcomment")]
    pub comment: String,
    #[serde(rename = "ttags")]
    pub tags: Vec<Tag>,
    #[serde(rename = "tpostings")]
    pub postings: Vec<Posting>,
}

/// A market price directive, e.g. from hledger-web's `/prices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPrice {
    #[serde(rename = "mpdate")]
    pub date: chrono::NaiveDate,
    #[serde(rename = "mpfrom")]
    pub from: Commodity,
    #[serde(rename = "mpto")]
    pub to: Commodity,
    #[serde(rename = "mprate")]
    pub rate: Quantity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_name_basename() {
        let name: AccountName = "assets:bank:checking".parse().unwrap();
        assert_eq!(name.basename(), "checking");

        let flat: AccountName = "equity".parse().unwrap();
        assert_eq!(flat.basename(), "equity");
    }

    #[test]
    fn test_account_name_parent() {
        let name: AccountName = "assets:bank:checking".parse().unwrap();
        assert_eq!(name.parent(), Some("assets:bank".parse().unwrap()));
        assert_eq!(name.parent().unwrap().parent(), Some("assets".parse().unwrap()));
        assert_eq!("assets".parse::<AccountName>().unwrap().parent(), None);
    }

    #[test]
    fn test_account_name_parents_outermost_first() {
        let name: AccountName = "assets:bank:checking".parse().unwrap();
        assert_eq!(
            name.parents(),
            vec!["assets".parse().unwrap(), "assets:bank".parse().unwrap()]
        );
    }

    #[test]
    fn test_account_name_is_parent_of() {
        let assets: AccountName = "assets".parse().unwrap();
        let checking: AccountName = "assets:bank:checking".parse().unwrap();
        let lookalike: AccountName = "assets2:cash".parse().unwrap();
        assert!(assets.is_parent_of(&checking));
        assert!(!assets.is_parent_of(&lookalike));
        assert!(!assets.is_parent_of(&assets));
    }

    #[test]
    fn test_account_name_rejects_empty() {
        assert_eq!("".parse::<AccountName>(), Err(ParseAccountNameError::Empty));
    }

    #[test]
    fn test_account_wire_format() {
        let json = r#"{
            "aname": "assets:bank",
            "adeclarationinfo": null,
            "asubs_": ["assets:bank:checking"],
            "aparent_": "assets",
            "aboring": false,
            "anumpostings": 3,
            "aebalance": [],
            "aibalance": [{
                "acommodity": "SEK",
                "aprice": null,
                "aquantity": {"decimalMantissa": 100000, "decimalPlaces": 2, "floatingPoint": 1000},
                "aismultiplier": false,
                "astyle": {
                    "ascommodityside": "R",
                    "ascommodityspaced": true,
                    "asdecimalpoint": ".",
                    "asdigitgroups": [",", [3]],
                    "asprecision": 2
                }
            }]
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.name.basename(), "bank");
        assert_eq!(account.parent, "assets".parse().unwrap());
        assert!(account.balance_excluding_subaccounts.is_empty());
        assert_eq!(
            account.balance_including_subaccounts.format(),
            vec!["1,000.00 SEK".to_string()]
        );
    }

    #[test]
    fn test_transaction_wire_format() {
        let json = r#"{
            "tindex": 1,
            "tprecedingcomment": "",
            "tsourcepos": [
                {"sourceLine": 10, "sourceColumn": 1, "sourceName": "journal.ledger"},
                {"sourceLine": 13, "sourceColumn": 1, "sourceName": "journal.ledger"}
            ],
            "tdate": "2024-03-01",
            "tdate2": null,
            "tstatus": "Cleared",
            "tcode": "",
            "tdescription": "groceries",
            "tcomment": "",
            "ttags": [],
            "tpostings": [{
                "pdate": null,
                "pdate2": null,
                "pstatus": "Unmarked",
                "paccount": "expenses:food",
                "pamount": [{
                    "acommodity": "SEK",
                    "aprice": null,
                    "aquantity": {"decimalMantissa": 12050, "decimalPlaces": 2, "floatingPoint": 120.5},
                    "aismultiplier": false,
                    "astyle": {
                        "ascommodityside": "R",
                        "ascommodityspaced": true,
                        "asdecimalpoint": ".",
                        "asdigitgroups": null,
                        "asprecision": 2
                    }
                }],
                "pcomment": "",
                "ptype": "RegularPosting",
                "ptags": [],
                "pbalanceassertion": null,
                "ptransaction_": 1,
                "poriginal": null
            }]
        }"#;
        let transaction: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(transaction.description, "groceries");
        assert_eq!(transaction.status, Status::Cleared);
        assert_eq!(transaction.date, chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let posting = &transaction.postings[0];
        assert_eq!(posting.account.basename(), "food");
        assert_eq!(posting.posting_type, PostingType::Regular);
        assert_eq!(posting.amount.format(), vec!["120.50 SEK".to_string()]);
    }
}
