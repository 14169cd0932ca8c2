//! Menú de navegación del sitio.
//!
//! La fuente primaria es la API; `default_menu` es el último recurso cuando
//! ni la API ni el fichero local están disponibles.
use serde::{Deserialize, Serialize};

use crate::{Locale, LocalizedText};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLink {
    pub label: LocalizedText,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub id: String,
    pub title: LocalizedText,
    #[serde(default)]
    pub links: Vec<MenuLink>,
}

impl MenuSection {
    pub fn labels(&self, locale: Locale) -> Vec<&str> {
        self.links.iter().map(|l| l.label.resolve(locale)).collect()
    }
}

fn link(en: &str, ar: &str, href: &str) -> MenuLink {
    MenuLink { label: LocalizedText::en_ar(en, ar),
               href: href.to_string() }
}

pub fn default_menu() -> Vec<MenuSection> {
    vec![MenuSection { id: "about".into(),
                       title: LocalizedText::en_ar("About", "عن المعهد"),
                       links: vec![link("Overview", "نبذة", "/about"), link("Departments", "الأقسام", "/departments")] },
         MenuSection { id: "services".into(),
                       title: LocalizedText::en_ar("Services", "الخدمات"),
                       links: vec![link("Training courses", "الدورات التدريبية", "/courses"),
                                   link("Agreements", "الاتفاقيات", "/agreements")] },
         MenuSection { id: "events".into(),
                       title: LocalizedText::en_ar("Events", "الفعاليات"),
                       links: vec![link("Conference registration", "التسجيل في المؤتمر", "/register")] }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_menu_links_registration() {
        let menu = default_menu();
        assert!(menu.iter().flat_map(|s| &s.links).any(|l| l.href == "/register"));
        assert_eq!(menu[0].labels(Locale::Ar), vec!["نبذة", "الأقسام"]);
    }

    #[test]
    fn section_accepts_plain_titles() {
        let raw = r#"{"id":"news","title":"News","links":[{"label":{"en":"Latest","ar":"الأحدث"},"href":"/news"}]}"#;
        let section: MenuSection = serde_json::from_str(raw).unwrap();
        assert_eq!(section.title.resolve(Locale::Ar), "News");
        assert_eq!(section.labels(Locale::Ar), vec!["الأحدث"]);
    }
}
