use crate::models::NewProperty;
use tracing::info;

#[allow(clippy::too_many_arguments)]
fn listing(
    address: &str,
    postcode: &str,
    price: u32,
    size: u32,
    bedrooms: u32,
    bathrooms: u32,
    coords: (f64, f64),
    url: &str,
    description: &str,
    has_garden: bool,
    has_parking: bool,
    yearly_profit: i64,
    left_in_deal: i64,
) -> NewProperty {
    NewProperty {
        address: address.to_string(),
        postcode: postcode.to_string(),
        price,
        size,
        bedrooms,
        bathrooms,
        latitude: Some(coords.0),
        longitude: Some(coords.1),
        image_url: None,
        prime_location_url: Some(url.to_string()),
        description: Some(description.to_string()),
        has_garden,
        has_parking,
        is_article4: false,
        yearly_profit: Some(yearly_profit),
        left_in_deal: Some(left_in_deal),
    }
}

fn city_listings(city: &str) -> Vec<NewProperty> {
    match city {
        "Birmingham" => vec![
            listing(
                "45 Soho Road, Handsworth, Birmingham",
                "B21 9DT",
                450_000,
                120,
                5,
                2,
                (52.5105, -1.9026),
                "https://www.rightmove.co.uk/properties/145628421#/?channel=RES_BUY",
                "Large Victorian terrace with HMO potential in popular Handsworth area.",
                true,
                true,
                32_400,
                12_600,
            ),
            listing(
                "128 Stratford Road, Sparkhill, Birmingham",
                "B11 1AR",
                385_000,
                95,
                4,
                2,
                (52.4592, -1.8633),
                "https://www.zoopla.co.uk/for-sale/details/13456789/",
                "Four bedroom semi-detached property ideal for HMO conversion in Sparkhill.",
                false,
                true,
                28_800,
                15_200,
            ),
            listing(
                "67 Moseley Road, Balsall Heath, Birmingham",
                "B12 9QY",
                420_000,
                110,
                5,
                3,
                (52.4595, -1.8856),
                "https://www.onthemarket.com/details/14567890/",
                "Spacious Victorian terrace with planning permission for HMO conversion.",
                true,
                false,
                35_100,
                18_900,
            ),
        ],
        "Manchester" => vec![
            listing(
                "89 Oxford Road, Longsight, Manchester",
                "M13 9GP",
                375_000,
                105,
                4,
                2,
                (53.4572, -2.2051),
                "https://www.rightmove.co.uk/properties/146892345#/?channel=RES_BUY",
                "Terrace house with existing HMO license near the universities.",
                true,
                true,
                30_400,
                13_600,
            ),
            listing(
                "156 Wilmslow Road, Fallowfield, Manchester",
                "M14 6UH",
                465_000,
                130,
                6,
                3,
                (53.4421, -2.2231),
                "https://www.zoopla.co.uk/for-sale/details/15678901/",
                "Large Edwardian house perfect for HMO investment in Fallowfield.",
                false,
                true,
                38_400,
                22_800,
            ),
            listing(
                "73 Dickenson Road, Rusholme, Manchester",
                "M14 5GL",
                295_000,
                92,
                4,
                2,
                (53.4596, -2.2285),
                "https://www.onthemarket.com/details/16789012/",
                "Victorian terrace with scope for HMO conversion close to Curry Mile.",
                true,
                false,
                26_800,
                8_200,
            ),
        ],
        _ => Vec::new(),
    }
}

fn additional_listings() -> Vec<NewProperty> {
    vec![
        listing(
            "45 Woodhouse Lane, Leeds",
            "LS2 9JT",
            315_000,
            100,
            4,
            2,
            (53.8034, -1.5498),
            "https://www.rightmove.co.uk/properties/150597864#/?channel=RES_BUY",
            "Four bedroom Victorian terrace with HMO potential close to campus.",
            true,
            false,
            28_800,
            13_200,
        ),
        listing(
            "78 Mauldeth Road, Fallowfield, Manchester",
            "M14 6HP",
            395_000,
            115,
            5,
            3,
            (53.4351, -2.2198),
            "https://www.zoopla.co.uk/for-sale/details/23456789/",
            "Large five bedroom house with existing HMO planning.",
            false,
            true,
            33_600,
            19_100,
        ),
        listing(
            "12 Brudenell Road, Hyde Park, Leeds",
            "LS6 1BD",
            289_000,
            98,
            4,
            1,
            (53.8121, -1.5712),
            "https://www.onthemarket.com/details/17890123/",
            "Mid-terrace student let with four double bedrooms.",
            false,
            false,
            25_900,
            9_400,
        ),
    ]
}

/// Hardcoded listings for a city with one to three of the shared extras mixed
/// in. The extras take the requested city's name in their address.
/// Returns an empty list for cities without hardcoded data.
pub fn hardcoded_for_city(city: &str, rng: &mut fastrand::Rng) -> Vec<NewProperty> {
    let mut properties = city_listings(city);
    if properties.is_empty() {
        return properties;
    }

    let mut extras = additional_listings();
    rng.shuffle(&mut extras);
    let take = rng.usize(1..=extras.len());

    for mut extra in extras.into_iter().take(take) {
        extra.address = extra
            .address
            .replace("Leeds", city)
            .replace("Manchester", city);
        properties.push(extra);
    }

    info!("Loaded {} hardcoded listings for {}", properties.len(), city);
    properties
}

/// Last-resort sample set used when the store is empty and generation failed
pub fn fallback_sample() -> Vec<NewProperty> {
    vec![
        listing(
            "93 Park Avenue, Birmingham",
            "B1 1AA",
            247_740,
            98,
            4,
            3,
            (52.4862, -1.8904),
            "https://www.primelocation.com/for-sale/details/93-park-avenue-birmingham",
            "4 bedroom property with excellent HMO potential and good transport links.",
            true,
            false,
            17_280,
            34_365,
        ),
        listing(
            "45 Victoria Road, Manchester",
            "M1 2AB",
            325_000,
            112,
            5,
            2,
            (53.4808, -2.2426),
            "https://www.primelocation.com/for-sale/details/45-victoria-road-manchester",
            "Victorian terraced house ideal for HMO conversion. Close to universities.",
            true,
            true,
            22_400,
            42_150,
        ),
        listing(
            "78 Chapel Street, Leeds",
            "LS1 3CD",
            189_000,
            95,
            4,
            2,
            (53.8008, -1.5491),
            "https://www.primelocation.com/for-sale/details/78-chapel-street-leeds",
            "Modern property perfect for student accommodation with strong yields.",
            false,
            false,
            19_200,
            28_350,
        ),
    ]
}
