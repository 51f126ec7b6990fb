//! Proof-of-stake chains showcased next to the comparison, and the data
//! attribution shown under it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub name: &'static str,
    pub logo_url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attribution {
    pub name: &'static str,
    pub url: &'static str,
}

pub const ATTRIBUTION: Attribution = Attribution {
    name: "Cambridge Blockchain Network Sustainability Index",
    url: "https://ccaf.io/cbnsi/ethereum",
};

pub const POS_CHAINS: &[Chain] = &[
    Chain {
        name: "Algorand",
        logo_url: "https://assets.coingecko.com/coins/images/4380/small/download.png",
    },
    Chain {
        name: "Ethereum",
        logo_url: "https://assets.coingecko.com/coins/images/279/small/ethereum.png",
    },
    Chain {
        name: "BNB Chain",
        logo_url: "https://assets.coingecko.com/coins/images/825/small/bnb-icon2_2x.png",
    },
    Chain {
        name: "Cardano",
        logo_url: "https://assets.coingecko.com/coins/images/975/small/cardano.png",
    },
    Chain {
        name: "Solana",
        logo_url: "https://assets.coingecko.com/coins/images/4128/small/solana.png",
    },
    Chain {
        name: "Polkadot",
        logo_url: "https://assets.coingecko.com/coins/images/12171/small/polkadot.png",
    },
    Chain {
        name: "Avalanche",
        logo_url: "https://assets.coingecko.com/coins/images/12559/standard/Avalanche_Circle_RedWhite_Trans.png?1696512369",
    },
    Chain {
        name: "Tezos",
        logo_url: "https://assets.coingecko.com/coins/images/976/standard/Tezos-logo.png?1696502091",
    },
    Chain {
        name: "Cosmos",
        logo_url: "https://assets.coingecko.com/coins/images/1481/small/cosmos_hub.png",
    },
    Chain {
        name: "NEAR Protocol",
        logo_url: "https://assets.coingecko.com/coins/images/10365/small/near_icon.png",
    },
];
