use crate::models::NewProperty;
use crate::scrapers::lha::{self, LhaRates};
use crate::scrapers::traits::ListingGenerator;
use crate::scrapers::types::SearchParams;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{debug, info};

const PRICE_FLOOR: u32 = 200_000;
const SIZE_SPREAD: u32 = 80;

struct CityProfile {
    name: &'static str,
    latitude: f64,
    longitude: f64,
    streets: &'static [&'static str],
    areas: &'static [&'static str],
    postcodes: &'static [&'static str],
}

const CITIES: &[CityProfile] = &[
    CityProfile {
        name: "Birmingham",
        latitude: 52.4862,
        longitude: -1.8904,
        streets: &[
            "Soho Road",
            "Stratford Road",
            "Moseley Road",
            "Pershore Road",
            "Bristol Road",
            "Hagley Road",
        ],
        areas: &["Handsworth", "Sparkhill", "Balsall Heath", "Selly Oak", "Kings Heath", "Moseley"],
        postcodes: &["B1", "B11", "B12", "B14", "B21", "B29"],
    },
    CityProfile {
        name: "Manchester",
        latitude: 53.4808,
        longitude: -2.2426,
        streets: &[
            "Oxford Road",
            "Wilmslow Road",
            "Dickenson Road",
            "Mauldeth Road",
            "Chorlton Road",
        ],
        areas: &["Longsight", "Fallowfield", "Rusholme", "Whalley Range", "Withington"],
        postcodes: &["M1", "M13", "M14", "M16"],
    },
    CityProfile {
        name: "Leeds",
        latitude: 53.8008,
        longitude: -1.5491,
        streets: &[
            "Cardigan Road",
            "Hyde Park Road",
            "Brudenell Road",
            "Woodhouse Lane",
            "Otley Road",
        ],
        areas: &["Headingley", "Hyde Park", "Burley", "Woodhouse", "Kirkstall"],
        postcodes: &["LS2", "LS4", "LS6", "LS11"],
    },
    CityProfile {
        name: "Sheffield",
        latitude: 53.3811,
        longitude: -1.4701,
        streets: &[
            "Ecclesall Road",
            "Crookes Valley Road",
            "Commonside",
            "Abbeydale Road",
            "Fulwood Road",
        ],
        areas: &["Crookes", "Walkley", "Nether Edge", "Broomhill", "Sharrow"],
        postcodes: &["S1", "S6", "S7", "S10", "S11"],
    },
    CityProfile {
        name: "Liverpool",
        latitude: 53.4084,
        longitude: -2.9916,
        streets: &[
            "Smithdown Road",
            "Mulgrave Street",
            "Ullet Road",
            "Aigburth Road",
            "Penny Lane",
        ],
        areas: &["Wavertree", "Toxteth", "Sefton Park", "Aigburth", "Kensington"],
        postcodes: &["L8", "L15", "L17", "L18"],
    },
    CityProfile {
        name: "Nottingham",
        latitude: 52.9548,
        longitude: -1.1581,
        streets: &["Mansfield Road", "Radford Road", "Derby Road", "Alfreton Road", "Forest Road"],
        areas: &["Carrington", "Hyson Green", "Radford", "Lenton", "Beeston"],
        postcodes: &["NG5", "NG7"],
    },
    CityProfile {
        name: "Leicester",
        latitude: 52.6369,
        longitude: -1.1398,
        streets: &[
            "Narborough Road",
            "Evington Road",
            "Hinckley Road",
            "London Road",
            "Welford Road",
        ],
        areas: &["Evington", "Clarendon Park", "Stoneygate", "Aylestone", "Highfields"],
        postcodes: &["LE1", "LE3", "LE5"],
    },
    CityProfile {
        name: "Newcastle",
        latitude: 54.9783,
        longitude: -1.6178,
        streets: &[
            "Chillingham Road",
            "Sandyford Road",
            "Westgate Road",
            "Jesmond Road",
            "Osborne Road",
        ],
        areas: &["Heaton", "Jesmond", "Gosforth", "Fenham", "Elswick"],
        postcodes: &["NE2", "NE3", "NE6"],
    },
];

/// Used for cities outside the table; centred on London
const FALLBACK_PROFILE: CityProfile = CityProfile {
    name: "",
    latitude: 51.5074,
    longitude: -0.1278,
    streets: &[
        "Park Avenue",
        "Station Road",
        "Church Lane",
        "Victoria Street",
        "Mill Lane",
        "High Street",
    ],
    areas: &["City Centre"],
    postcodes: &["SW1A"],
};

const DESCRIPTIONS: &[&str] = &[
    "Victorian terrace with excellent HMO potential in popular area",
    "Spacious house ideal for HMO conversion with planning permission",
    "Large property perfect for HMO investment near universities",
    "Well-presented house with existing HMO license",
    "Investment opportunity with established HMO potential",
    "Multi-bedroom property suitable for HMO licensing",
];

/// Generates plausible listings without touching the network.
///
/// Stands in for a portal scraper: prices, sizes and flags are drawn at random
/// within the search criteria, and the finance fields come from the LHA table.
pub struct SyntheticGenerator {
    rng: Mutex<fastrand::Rng>,
}

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Deterministic generator for tests and reproducible demos
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    fn profile(city: &str) -> &'static CityProfile {
        CITIES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(city))
            .unwrap_or(&FALLBACK_PROFILE)
    }

    fn listing(
        rng: &mut fastrand::Rng,
        profile: &CityProfile,
        city: &str,
        params: &SearchParams,
        index: usize,
    ) -> NewProperty {
        let house_number = rng.u32(1..=200);
        let street = pick(rng, profile.streets);
        let area = pick(rng, profile.areas);
        let address = format!("{} {}, {}, {}", house_number, street, area, city);

        let price_floor = PRICE_FLOOR.min(params.max_price);
        let price = if price_floor < params.max_price {
            rng.u32(price_floor..params.max_price)
        } else {
            params.max_price
        };
        let size = params.min_area.saturating_add(rng.u32(0..SIZE_SPREAD));
        let bedrooms = rng.u32(3..=5);
        let bathrooms = rng.u32(1..=2);

        let rates = LhaRates::for_city(city);
        let yearly_profit = lha::yearly_profit(&rates, bedrooms);
        let left_in_deal = lha::left_in_deal(price, yearly_profit);

        let postcode = format!(
            "{} {}{}{}",
            pick(rng, profile.postcodes),
            rng.u8(1..=9),
            rng.uppercase(),
            rng.uppercase()
        );

        let mut description = format!(
            "{} with {} bedrooms and {} bathrooms, {}sqm.",
            pick(rng, DESCRIPTIONS),
            bedrooms,
            bathrooms,
            size
        );
        description.truncate(200);

        NewProperty {
            address,
            postcode,
            price,
            size,
            bedrooms,
            bathrooms,
            latitude: Some(profile.latitude + (rng.f64() - 0.5) * 0.02),
            longitude: Some(profile.longitude + (rng.f64() - 0.5) * 0.02),
            image_url: Some(format!(
                "https://placehold.co/800x600?text={}+HMO+{}",
                city.replace(' ', "+"),
                index + 1
            )),
            prime_location_url: Some(listing_url(rng)),
            description: Some(description),
            has_garden: rng.f32() > 0.4,
            has_parking: rng.f32() > 0.3,
            is_article4: rng.f32() < 0.25,
            yearly_profit: Some(yearly_profit),
            left_in_deal: Some(left_in_deal),
        }
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn pick<'a>(rng: &mut fastrand::Rng, items: &[&'a str]) -> &'a str {
    items[rng.usize(..items.len())]
}

fn listing_url(rng: &mut fastrand::Rng) -> String {
    let id = rng.u32(1_000_000..10_000_000);
    match rng.u8(0..3) {
        0 => format!("https://www.rightmove.co.uk/properties/{}#/", id),
        1 => format!("https://www.zoopla.co.uk/for-sale/details/{}/", id),
        _ => format!("https://www.onthemarket.com/details/{}/", id),
    }
}

#[async_trait]
impl ListingGenerator for SyntheticGenerator {
    async fn generate(&self, params: &SearchParams) -> Result<Vec<NewProperty>> {
        info!(
            city = %params.city,
            max_price = params.max_price,
            min_area = params.min_area,
            "Generating listings"
        );

        let profile = Self::profile(&params.city);
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("generator rng lock poisoned"))?;

        let count = rng.usize(8..=10);
        let properties: Vec<NewProperty> = (0..count)
            .map(|i| Self::listing(&mut rng, profile, &params.city, params, i))
            .collect();

        debug!("Generated {} listings for {}", properties.len(), params.city);
        Ok(properties)
    }

    fn available_cities(&self) -> Vec<String> {
        CITIES.iter().map(|p| p.name.to_string()).collect()
    }

    fn source_name(&self) -> &'static str {
        "Synthetic"
    }
}
