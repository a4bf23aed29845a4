use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// A marketplace brand with its category grouping and search aliases.
///
/// Aliases include Thai-script transliterations and popular model names so
/// that a query like "ไอโฟน" or "civic" resolves to the owning brand.
#[derive(Debug, Clone, Copy)]
pub struct BrandEntry {
    pub brand: &'static str,
    pub category: &'static str,
    pub aliases: &'static [&'static str],
}

/// Brand dictionary in priority order.
///
/// Declaration order is load-bearing: brand detection stops at the first
/// entry with any matching term, so earlier entries shadow later ones.
pub static BRAND_KEYWORDS: &[BrandEntry] = &[
    // Electronics - Mobile
    BrandEntry { brand: "apple", category: "mobile", aliases: &["แอปเปิ้ล", "ไอโฟน", "iphone", "ipad", "mac", "macbook", "airpods"] },
    BrandEntry { brand: "samsung", category: "mobile", aliases: &["ซัมซุง", "galaxy", "note", "fold", "flip"] },
    BrandEntry { brand: "xiaomi", category: "mobile", aliases: &["เสี่ยวหมี่", "mi", "redmi", "poco"] },
    BrandEntry { brand: "oppo", category: "mobile", aliases: &["ออปโป้"] },
    BrandEntry { brand: "vivo", category: "mobile", aliases: &["วีโว่"] },
    BrandEntry { brand: "huawei", category: "mobile", aliases: &["หัวเว่ย"] },
    BrandEntry { brand: "realme", category: "mobile", aliases: &["เรียวมี"] },
    // Electronics - Gaming
    BrandEntry { brand: "sony", category: "gaming", aliases: &["โซนี่", "playstation", "ps5", "ps4", "ps3"] },
    BrandEntry { brand: "nintendo", category: "gaming", aliases: &["นินเทนโด้", "switch"] },
    BrandEntry { brand: "xbox", category: "gaming", aliases: &["เอ็กซ์บ็อกซ์"] },
    // Electronics - Camera
    BrandEntry { brand: "canon", category: "camera", aliases: &["แคนนอน", "eos"] },
    BrandEntry { brand: "nikon", category: "camera", aliases: &["นิคอน"] },
    BrandEntry { brand: "fujifilm", category: "camera", aliases: &["ฟูจิ", "fuji", "x-t", "x100"] },
    BrandEntry { brand: "sony_camera", category: "camera", aliases: &["โซนี่", "alpha", "a7"] },
    // Automotive - Cars
    BrandEntry { brand: "toyota", category: "car", aliases: &["โตโยต้า", "camry", "corolla", "yaris", "vios", "fortuner", "hilux"] },
    BrandEntry { brand: "honda", category: "car", aliases: &["ฮอนด้า", "civic", "accord", "city", "jazz", "hr-v", "cr-v"] },
    BrandEntry { brand: "mazda", category: "car", aliases: &["มาสด้า", "cx-3", "cx-5", "cx-30"] },
    BrandEntry { brand: "nissan", category: "car", aliases: &["นิสสัน", "almera", "kicks", "navara"] },
    BrandEntry { brand: "mitsubishi", category: "car", aliases: &["มิตซูบิชิ", "pajero", "triton", "xpander"] },
    BrandEntry { brand: "ford", category: "car", aliases: &["ฟอร์ด", "ranger", "everest"] },
    BrandEntry { brand: "isuzu", category: "car", aliases: &["อีซูซุ", "d-max", "mu-x"] },
    BrandEntry { brand: "mg", category: "car", aliases: &["เอ็มจี", "zs", "hs"] },
    BrandEntry { brand: "bmw", category: "car", aliases: &["บีเอ็มดับเบิลยู"] },
    BrandEntry { brand: "mercedes", category: "car", aliases: &["เบนซ์", "benz", "เมอร์เซเดส"] },
    BrandEntry { brand: "lexus", category: "car", aliases: &["เล็กซัส"] },
    // Automotive - Motorcycles
    BrandEntry { brand: "honda_motorcycle", category: "motorcycle", aliases: &["ฮอนด้า", "wave", "click", "pcx", "adv", "forza", "cbr"] },
    BrandEntry { brand: "yamaha", category: "motorcycle", aliases: &["ยามาฮ่า", "fino", "grand", "mt", "xmax", "r1", "r6"] },
    BrandEntry { brand: "kawasaki", category: "motorcycle", aliases: &["คาวาซากิ", "ninja", "z"] },
    BrandEntry { brand: "suzuki", category: "motorcycle", aliases: &["ซูซูกิ", "gsx"] },
    BrandEntry { brand: "vespa", category: "motorcycle", aliases: &["เวสป้า"] },
    BrandEntry { brand: "harley", category: "motorcycle", aliases: &["ฮาร์เลย์", "harley-davidson"] },
    BrandEntry { brand: "ducati", category: "motorcycle", aliases: &["ดูคาติ"] },
    BrandEntry { brand: "bmw_motorcycle", category: "motorcycle", aliases: &["บีเอ็มดับเบิลยู motorrad"] },
    // Fashion
    BrandEntry { brand: "nike", category: "fashion", aliases: &["ไนกี้", "air jordan", "dunk", "air force"] },
    BrandEntry { brand: "adidas", category: "fashion", aliases: &["อาดิดาส", "yeezy", "ultraboost"] },
    BrandEntry { brand: "converse", category: "fashion", aliases: &["คอนเวิร์ส", "chuck"] },
    BrandEntry { brand: "vans", category: "fashion", aliases: &["แวนส์", "old skool"] },
    BrandEntry { brand: "uniqlo", category: "fashion", aliases: &["ยูนิโคล่"] },
    BrandEntry { brand: "h&m", category: "fashion", aliases: &["เอชแอนด์เอ็ม", "hm"] },
    BrandEntry { brand: "zara", category: "fashion", aliases: &["ซาร่า"] },
    BrandEntry { brand: "gucci", category: "fashion", aliases: &["กุชชี่"] },
    BrandEntry { brand: "louis vuitton", category: "fashion", aliases: &["หลุยส์", "lv"] },
    BrandEntry { brand: "chanel", category: "fashion", aliases: &["ชาแนล"] },
];

/// Common misspellings and their canonical forms, in application order.
pub static SPELLING_CORRECTIONS: &[(&str, &str)] = &[
    // English typos
    ("iphne", "iphone"),
    ("ipone", "iphone"),
    ("iphon", "iphone"),
    ("samsug", "samsung"),
    ("samsun", "samsung"),
    ("samung", "samsung"),
    ("macbok", "macbook"),
    ("playstaion", "playstation"),
    ("nintedo", "nintendo"),
    ("airpod", "airpods"),
    // Thai typos
    ("ไอโพน", "ไอโฟน"),
    ("ไอโฟ", "ไอโฟน"),
    ("แอปเปิล", "apple"),
    ("โตโยตา", "โตโยต้า"),
    ("ฮอนด้", "ฮอนด้า"),
    ("ซัมซุ", "ซัมซุง"),
    ("มาสด้", "มาสด้า"),
    ("นิสสั", "นิสสัน"),
];

/// Whether a price pattern captures a single upper bound or a min/max pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePatternKind {
    Max,
    Range,
}

/// Recognized place names (Thai and English) plus proximity phrases.
pub static LOCATIONS: &[&str] = &[
    "กรุงเทพ", "กทม", "bangkok",
    "เชียงใหม่", "chiangmai",
    "ภูเก็ต", "phuket",
    "พัทยา", "ชลบุรี", "chonburi",
    "นนทบุรี", "ปทุมธานี",
    "ใกล้ฉัน", "near me", "nearby",
];

/// Proximity phrases that normalize to the "nearby" sentinel instead of a
/// literal place name.
pub static PROXIMITY_PHRASES: &[&str] = &["ใกล้ฉัน", "near me", "nearby"];

/// Terms signalling a second-hand listing. Checked before NEW_TERMS, so a
/// query carrying both signals resolves to used.
pub static USED_TERMS: &[&str] = &["มือสอง", "มือ2", "secondhand", "second hand", "used", "สภาพดี", "มือ 2"];

/// Terms signalling a brand-new listing.
pub static NEW_TERMS: &[&str] = &["มือหนึ่ง", "มือ1", "ใหม่", "new", "brand new", "มือ 1", "ของใหม่"];

/// Comparison-intent trigger terms.
pub static COMPARISON_TERMS: &[&str] = &["เทียบ", "compare", "vs", "หรือ", "กับ", "ดีกว่า", "better"];

/// Coarse category hints, in priority order. First category with any
/// matching hint word wins.
pub static CATEGORY_HINTS: &[(&str, &[&str])] = &[
    ("car", &["รถยนต์", "รถเก๋ง", "รถกระบะ", "รถ suv", "car", "sedan", "pickup"]),
    ("motorcycle", &["มอเตอร์ไซค์", "มอไซค์", "บิ๊กไบค์", "สกูตเตอร์", "motorcycle", "scooter"]),
    ("real_estate", &["บ้าน", "คอนโด", "ทาวน์โฮม", "อพาร์ทเม้นท์", "condo", "house"]),
    ("mobile", &["มือถือ", "โทรศัพท์", "สมาร์ทโฟน", "phone", "smartphone"]),
    ("gaming", &["เกม", "เครื่องเล่นเกม", "game", "gaming", "console"]),
    ("camera", &["กล้อง", "camera", "lens", "เลนส์"]),
    ("fashion", &["เสื้อผ้า", "รองเท้า", "กระเป๋า", "นาฬิกา", "clothes", "shoes", "bag", "watch"]),
];

lazy_static! {
    /// Spelling rules with pre-compiled whole-word patterns.
    ///
    /// Word boundaries keep a rule like `iphon -> iphone` from rewriting the
    /// inside of an already-correct "iphone".
    pub static ref SPELLING_RULES: Vec<(Regex, &'static str)> = SPELLING_CORRECTIONS
        .iter()
        .map(|&(mistake, fix)| {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(mistake)))
                .expect("spelling rule pattern is valid");
            (pattern, fix)
        })
        .collect();

    /// Price patterns, tried in order; Thai phrasing first, then English.
    /// The first match decides the result, so more specific phrasings must
    /// precede the bare numeric range.
    pub static ref PRICE_PATTERNS: Vec<(Regex, PricePatternKind)> = vec![
        // Thai patterns
        (Regex::new(r"ไม่เกิน\s*(\d+(?:,\d+)*)").unwrap(), PricePatternKind::Max),
        (Regex::new(r"ต่ำกว่า\s*(\d+(?:,\d+)*)").unwrap(), PricePatternKind::Max),
        (Regex::new(r"ราคา\s*(\d+(?:,\d+)*)\s*[-–]\s*(\d+(?:,\d+)*)").unwrap(), PricePatternKind::Range),
        (Regex::new(r"งบ\s*(\d+(?:,\d+)*)").unwrap(), PricePatternKind::Max),
        // English patterns
        (Regex::new(r"(?i)under\s*(\d+(?:,\d+)*k?)").unwrap(), PricePatternKind::Max),
        (Regex::new(r"(?i)below\s*(\d+(?:,\d+)*k?)").unwrap(), PricePatternKind::Max),
        (Regex::new(r"(?i)(\d+(?:,\d+)*)\s*(?:-|–|to)\s*(\d+(?:,\d+)*)").unwrap(), PricePatternKind::Range),
        (Regex::new(r"(?i)budget\s*(\d+(?:,\d+)*k?)").unwrap(), PricePatternKind::Max),
    ];

    /// Bare 4-digit year token. ASCII boundaries, so a year glued to Thai
    /// text ("รถปี2020") still matches; unspaced Thai queries are common.
    /// Accepted values are range-checked afterwards.
    pub static ref YEAR_PATTERN: Regex =
        Regex::new(r"(?-u:\b)(?:19|20)\d{2}(?-u:\b)").unwrap();

    /// Second-hand wording replaced by the "มือ2" shorthand during expansion.
    pub static ref USED_SHORTHAND_PATTERN: Regex =
        Regex::new(r"(?i)มือสอง|used|secondhand").unwrap();

    /// Category name to marketplace category id.
    pub static ref CATEGORY_IDS: HashMap<&'static str, u32> = {
        let mut m = HashMap::new();
        m.insert("car", 1);          // ยานยนต์
        m.insert("motorcycle", 1);   // ยานยนต์
        m.insert("real_estate", 2);  // อสังหาริมทรัพย์
        m.insert("mobile", 3);       // มือถือและแท็บเล็ต
        m.insert("computer", 4);     // คอมพิวเตอร์และไอที
        m.insert("appliances", 5);   // เครื่องใช้ไฟฟ้า
        m.insert("fashion", 6);      // แฟชั่น
        m.insert("gaming", 7);       // เกมและแก็ดเจ็ต
        m.insert("camera", 8);       // กล้องถ่ายรูป
        m
    };
}

/// Look up a brand entry by its identifier.
pub fn brand_entry(brand: &str) -> Option<&'static BrandEntry> {
    BRAND_KEYWORDS.iter().find(|entry| entry.brand == brand)
}
