// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo project fixture.
//!
//! A complete, schema-conformant raw document used to populate a fresh UI and
//! as a baseline in tests. It is not consulted by the validator or the store.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

static DEMO_DOCUMENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "name": "Atlas Chain",
        "slug": "atlas-chain",
        "ticker": "atlas",
        "chainTarget": "Ethereum",
        "theme": "midnight",
        "oneLiner": "Modular infrastructure for tokenized assets.",
        "description": "Atlas Chain offers a stack to issue and operate digital assets with regulatory compliance and programmable liquidity.",
        "valueProp": "Fast tokenization with built-in compliance, real-time analytics and access to global markets.",
        "roadmap": [
            {
                "title": "Protocol design",
                "description": "Core modules and security architecture.",
                "dateLabel": "Q1 2024",
                "status": "DONE"
            },
            {
                "title": "Private testnet",
                "description": "Launch with strategic validators and performance metrics.",
                "dateLabel": "Q2 2024",
                "status": "IN_PROGRESS"
            },
            {
                "title": "External audit",
                "description": "Contract review and stack hardening.",
                "dateLabel": "Q3 2024",
                "status": "PLANNED"
            },
            {
                "title": "Mainnet and listing",
                "description": "Public deployment and liquidity partner agreements.",
                "dateLabel": "Q4 2024",
                "status": "PLANNED"
            }
        ],
        "tokenomics": {
            "totalSupply": "1000000000",
            "decimals": 18,
            "maxSupply": "1200000000",
            "burnFeeBps": 25,
            "allocations": [
                {
                    "name": "Community",
                    "percent": 45,
                    "vesting": "24 months",
                    "cliff": "3 months",
                    "notes": "Liquidity and staking programs."
                },
                {
                    "name": "Team",
                    "percent": 20,
                    "vesting": "36 months",
                    "cliff": "12 months"
                },
                { "name": "Treasury", "percent": 15 },
                { "name": "Ecosystem", "percent": 10 }
            ]
        },
        "rounds": {
            "preSales": [
                {
                    "id": "8a0a9b2b-1111-4f3b-9d6a-0b2af4fbe001",
                    "name": "Seed",
                    "kind": "PRESALE",
                    "start": "2024-05-01T00:00:00.000Z",
                    "end": "2024-05-20T00:00:00.000Z",
                    "price": "0.015",
                    "hardCap": "1500000",
                    "minBuy": "250",
                    "maxBuy": "25000",
                    "acceptedCurrency": "USDT",
                    "whitelistEnabled": true,
                    "vestingEnabled": true
                },
                {
                    "id": "8a0a9b2b-2222-4f3b-9d6a-0b2af4fbe002",
                    "name": "Strategic",
                    "kind": "PRESALE",
                    "start": "2024-06-01T00:00:00.000Z",
                    "end": "2024-06-20T00:00:00.000Z",
                    "price": "0.022",
                    "hardCap": "2500000",
                    "minBuy": "500",
                    "maxBuy": "50000",
                    "acceptedCurrency": "USDC",
                    "whitelistEnabled": true,
                    "vestingEnabled": true
                }
            ],
            "publicSales": [
                {
                    "id": "8a0a9b2b-3333-4f3b-9d6a-0b2af4fbe003",
                    "name": "Public Round",
                    "kind": "PUBLIC",
                    "start": "2024-07-10T00:00:00.000Z",
                    "end": "2024-07-25T00:00:00.000Z",
                    "price": "0.03",
                    "hardCap": "6000000",
                    "minBuy": "100",
                    "maxBuy": "10000",
                    "acceptedCurrency": "ETH",
                    "whitelistEnabled": false,
                    "vestingEnabled": false
                }
            ]
        },
        "compliance": {
            "kycRequired": true,
            "geoRestrictions": ["US", "CN"],
            "disclaimer": "Token purchases are subject to KYC checks and local restrictions."
        },
        "links": {
            "website": "https://atlaschain.example",
            "whitepaper": "https://atlaschain.example/whitepaper.pdf",
            "docs": "https://docs.atlaschain.example",
            "twitter": "https://twitter.com/atlaschain",
            "telegram": "https://t.me/atlaschain",
            "discord": "https://discord.gg/atlaschain"
        },
        "createdAt": "2024-04-15T12:00:00.000Z",
        "updatedAt": "2024-05-05T12:00:00.000Z"
    })
});

/// Returns a fresh copy of the raw "Atlas Chain" demo document.
///
/// The ticker is deliberately lower-case; validation upper-cases it.
pub fn demo_document() -> Value {
    DEMO_DOCUMENT.clone()
}
