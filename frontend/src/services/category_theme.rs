//! # Category Theme
//!
//! Maps category names to presentation tokens (an icon and a color).
//!
//! The table is built once at startup from the Spanish category names the
//! backend uses, optionally extended from configuration, and is immutable
//! afterwards. It is shared through an `Arc` with whoever needs to render a
//! category; lookups never fail and unknown names resolve to
//! [`CategoryPresentation::DEFAULT`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Icons available for categories
/// Serialized with the same kebab-case names [`IconId::name`] returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconId {
    Home,
    Utensils,
    Heart,
    ShoppingCart,
    CreditCard,
    Wrench,
    HeartHandshake,
    GraduationCap,
    Receipt,
    Shirt,
    PiggyBank,
    PawPrint,
    MoreHorizontal,
    Banknote,
    Settings,
    ShoppingBag,
    Car,
    Plane,
    #[serde(rename = "gamepad-2")]
    Gamepad2,
    DollarSign,
    Calendar,
}

impl IconId {
    /// Kebab-case icon name as used by the icon set
    pub fn name(self) -> &'static str {
        match self {
            IconId::Home => "home",
            IconId::Utensils => "utensils",
            IconId::Heart => "heart",
            IconId::ShoppingCart => "shopping-cart",
            IconId::CreditCard => "credit-card",
            IconId::Wrench => "wrench",
            IconId::HeartHandshake => "heart-handshake",
            IconId::GraduationCap => "graduation-cap",
            IconId::Receipt => "receipt",
            IconId::Shirt => "shirt",
            IconId::PiggyBank => "piggy-bank",
            IconId::PawPrint => "paw-print",
            IconId::MoreHorizontal => "more-horizontal",
            IconId::Banknote => "banknote",
            IconId::Settings => "settings",
            IconId::ShoppingBag => "shopping-bag",
            IconId::Car => "car",
            IconId::Plane => "plane",
            IconId::Gamepad2 => "gamepad-2",
            IconId::DollarSign => "dollar-sign",
            IconId::Calendar => "calendar",
        }
    }
}

/// Background colors available for categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorToken {
    Blue500,
    Blue600,
    Orange500,
    Red500,
    Red600,
    Green500,
    Green600,
    Purple500,
    Yellow500,
    Pink500,
    Indigo500,
    Cyan500,
    Emerald500,
    Amber500,
    Gray500,
    Rose500,
    Slate500,
    Violet500,
    Sky500,
    Teal500,
    Fuchsia500,
}

impl ColorToken {
    /// Tailwind background class pair (base + hover)
    pub fn css_classes(self) -> &'static str {
        match self {
            ColorToken::Blue500 => "bg-blue-500 hover:bg-blue-600",
            ColorToken::Blue600 => "bg-blue-600 hover:bg-blue-700",
            ColorToken::Orange500 => "bg-orange-500 hover:bg-orange-600",
            ColorToken::Red500 => "bg-red-500 hover:bg-red-600",
            ColorToken::Red600 => "bg-red-600 hover:bg-red-700",
            ColorToken::Green500 => "bg-green-500 hover:bg-green-600",
            ColorToken::Green600 => "bg-green-600 hover:bg-green-700",
            ColorToken::Purple500 => "bg-purple-500 hover:bg-purple-600",
            ColorToken::Yellow500 => "bg-yellow-500 hover:bg-yellow-600",
            ColorToken::Pink500 => "bg-pink-500 hover:bg-pink-600",
            ColorToken::Indigo500 => "bg-indigo-500 hover:bg-indigo-600",
            ColorToken::Cyan500 => "bg-cyan-500 hover:bg-cyan-600",
            ColorToken::Emerald500 => "bg-emerald-500 hover:bg-emerald-600",
            ColorToken::Amber500 => "bg-amber-500 hover:bg-amber-600",
            ColorToken::Gray500 => "bg-gray-500 hover:bg-gray-600",
            ColorToken::Rose500 => "bg-rose-500 hover:bg-rose-600",
            ColorToken::Slate500 => "bg-slate-500 hover:bg-slate-600",
            ColorToken::Violet500 => "bg-violet-500 hover:bg-violet-600",
            ColorToken::Sky500 => "bg-sky-500 hover:bg-sky-600",
            ColorToken::Teal500 => "bg-teal-500 hover:bg-teal-600",
            ColorToken::Fuchsia500 => "bg-fuchsia-500 hover:bg-fuchsia-600",
        }
    }
}

/// Icon and color shown for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPresentation {
    pub icon: IconId,
    pub color: ColorToken,
}

impl CategoryPresentation {
    pub const DEFAULT: CategoryPresentation = CategoryPresentation {
        icon: IconId::MoreHorizontal,
        color: ColorToken::Gray500,
    };
}

/// Config entry adding or replacing a presentation for one category name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPresentationEntry {
    pub name: String,
    pub icon: IconId,
    pub color: ColorToken,
}

// Full names first, then the single-word variations users type.
const SPANISH_DEFAULTS: &[(&str, IconId, ColorToken)] = &[
    ("hogar", IconId::Home, ColorToken::Blue500),
    ("comidas y bebidas", IconId::Utensils, ColorToken::Orange500),
    ("salud y cuidado personal", IconId::Heart, ColorToken::Red500),
    ("supermercado", IconId::ShoppingCart, ColorToken::Green500),
    ("comisiones y cargos", IconId::CreditCard, ColorToken::Purple500),
    ("cuentas y servicios", IconId::Wrench, ColorToken::Yellow500),
    ("donaciones", IconId::HeartHandshake, ColorToken::Pink500),
    ("educación", IconId::GraduationCap, ColorToken::Indigo500),
    ("impuestos", IconId::Receipt, ColorToken::Red600),
    ("indumentaria", IconId::Shirt, ColorToken::Cyan500),
    ("inversiones", IconId::PiggyBank, ColorToken::Emerald500),
    ("mascotas", IconId::PawPrint, ColorToken::Amber500),
    ("otros", IconId::MoreHorizontal, ColorToken::Gray500),
    ("préstamos y financiación", IconId::Banknote, ColorToken::Rose500),
    ("servicios profesionales", IconId::Settings, ColorToken::Slate500),
    ("shopping", IconId::ShoppingBag, ColorToken::Violet500),
    ("transporte", IconId::Car, ColorToken::Sky500),
    ("viajes", IconId::Plane, ColorToken::Teal500),
    ("entretenimiento", IconId::Gamepad2, ColorToken::Fuchsia500),
    ("amistades y familia", IconId::HeartHandshake, ColorToken::Pink500),
    ("sueldo", IconId::DollarSign, ColorToken::Green600),
    ("suscripciones", IconId::Calendar, ColorToken::Blue600),
    ("comidas", IconId::Utensils, ColorToken::Orange500),
    ("bebidas", IconId::Utensils, ColorToken::Orange500),
    ("salud", IconId::Heart, ColorToken::Red500),
    ("cuidado personal", IconId::Heart, ColorToken::Red500),
    ("comisiones", IconId::CreditCard, ColorToken::Purple500),
    ("cargos", IconId::CreditCard, ColorToken::Purple500),
    ("cuentas", IconId::Wrench, ColorToken::Yellow500),
    ("servicios", IconId::Wrench, ColorToken::Yellow500),
    ("educacion", IconId::GraduationCap, ColorToken::Indigo500),
    ("prestamos", IconId::Banknote, ColorToken::Rose500),
    ("financiacion", IconId::Banknote, ColorToken::Rose500),
    ("profesionales", IconId::Settings, ColorToken::Slate500),
    ("amistades", IconId::HeartHandshake, ColorToken::Pink500),
    ("familia", IconId::HeartHandshake, ColorToken::Pink500),
];

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Immutable name → presentation table
#[derive(Debug, Clone)]
pub struct CategoryTheme {
    entries: HashMap<String, CategoryPresentation>,
}

impl CategoryTheme {
    /// Theme for the backend's Spanish category names
    pub fn spanish_defaults() -> Self {
        Self::with_overrides(&[])
    }

    /// Spanish defaults extended (or replaced, on name clash) by config entries
    pub fn with_overrides(overrides: &[CategoryPresentationEntry]) -> Self {
        let mut entries: HashMap<String, CategoryPresentation> = SPANISH_DEFAULTS
            .iter()
            .map(|(name, icon, color)| {
                (name.to_string(), CategoryPresentation { icon: *icon, color: *color })
            })
            .collect();

        for entry in overrides {
            entries.insert(
                normalize(&entry.name),
                CategoryPresentation {
                    icon: entry.icon,
                    color: entry.color,
                },
            );
        }

        Self { entries }
    }

    pub fn presentation(&self, category_name: &str) -> CategoryPresentation {
        self.entries
            .get(&normalize(category_name))
            .copied()
            .unwrap_or(CategoryPresentation::DEFAULT)
    }

    pub fn icon(&self, category_name: &str) -> IconId {
        self.presentation(category_name).icon
    }

    pub fn color(&self, category_name: &str) -> ColorToken {
        self.presentation(category_name).color
    }
}

impl Default for CategoryTheme {
    fn default() -> Self {
        Self::spanish_defaults()
    }
}
