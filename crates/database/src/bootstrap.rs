//! Default content inserted on first start.
//!
//! Each collection is seeded only while it is empty, so running this on every
//! start is safe.

use crate::collections::{COMPANY_INFO, SERVICES, STATISTICS};
use crate::document::timestamp;
use crate::error::Result;
use crate::filter::Filter;
use crate::models::{new_id, CompanyInfo, Service, Statistics, StatisticsCounters};
use crate::Database;

/// What a bootstrap run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub company: bool,
    pub services: u64,
    pub statistics: bool,
}

/// Insert the company profile, the six default services and the statistics
/// singleton wherever they are missing.
pub async fn run(db: &Database) -> Result<BootstrapReport> {
    let mut report = BootstrapReport::default();

    let company = db.collection(COMPANY_INFO);
    if company.find_one(&Filter::new()).await?.is_none() {
        company.insert_one(&default_company()).await?;
        report.company = true;
        tracing::info!("Company info initialized");
    }

    let services = db.collection(SERVICES);
    if services.count(&Filter::new()).await? == 0 {
        report.services = services.insert_many(&default_services()).await?;
        tracing::info!(count = report.services, "Services initialized");
    }

    let statistics = db.collection(STATISTICS);
    if statistics.find_one(&Filter::new()).await?.is_none() {
        statistics
            .insert_one(&Statistics::new(StatisticsCounters::default()))
            .await?;
        report.statistics = true;
        tracing::info!("Statistics initialized");
    }

    tracing::info!(?report, "Database initialization completed");
    Ok(report)
}

/// The company profile shipped with the site.
pub fn default_company() -> CompanyInfo {
    CompanyInfo {
        id: new_id(),
        name: "شركة المستودعات السوداء المحدودة".to_string(),
        name_en: Some("Al-Sawda Warehouses Limited Company".to_string()),
        tagline: "للديكور الداخلي والخارجي والمقاولات العامة".to_string(),
        tagline_en: Some("Interior & Exterior Design and General Contracting".to_string()),
        description: "نحول أحلامك إلى واقع بلمسة فنية متميزة تجمع بين الأصالة والحداثة في جميع أنحاء المملكة العربية السعودية".to_string(),
        description_en: Some("We transform your dreams into reality with distinguished artistic touch combining authenticity and modernity throughout Saudi Arabia".to_string()),
        phone: "+966 56 897 9993".to_string(),
        email: "info@alsawda-warehouses.sa".to_string(),
        address: "ضحضاح، نجران 66271، المملكة العربية السعودية".to_string(),
        address_en: Some("Dhadhah, Najran 66271, Saudi Arabia".to_string()),
        rating: 4.8,
        review_count: 17,
        working_hours_weekdays: "السبت - الخميس: 8:00 ص - 11:00 م".to_string(),
        working_hours_friday: "الجمعة: 4:00 م - 10:00 م".to_string(),
        whatsapp: "+966568979993".to_string(),
        map_url: Some("https://g.co/kgs/wxTrhyM".to_string()),
        updated_at: timestamp::now(),
    }
}

/// The six services listed on a fresh site.
pub fn default_services() -> Vec<Service> {
    let services = [
        (
            "ديكور داخلي",
            "Interior Design",
            "تصميم وتنفيذ ديكورات داخلية عصرية وفاخرة تناسب جميع الأذواق والميزانيات، من الفلل والقصور إلى المكاتب والمحلات التجارية مع استخدام أجود المواد.",
            "Design and implementation of modern and luxurious interior decorations suitable for all tastes and budgets, from villas and palaces to offices and shops using the finest materials.",
            "fas fa-home",
            "design",
        ),
        (
            "ديكور خارجي",
            "Exterior Design",
            "تصميم الحدائق والمساحات الخارجية والواجهات المعمارية بلمسة فنية متميزة تعكس جمال البيئة السعودية وتراعي المناخ المحلي.",
            "Design of gardens, outdoor spaces and architectural facades with a distinctive artistic touch that reflects the beauty of the Saudi environment and takes into account the local climate.",
            "fas fa-tree",
            "design",
        ),
        (
            "المقاولات العامة",
            "General Contracting",
            "تنفيذ مشاريع البناء والتشييد بأعلى معايير الجودة والسلامة، من الأساسات حتى التشطيبات النهائية مع ضمان الالتزام بالمواعيد.",
            "Implementation of construction projects with the highest standards of quality and safety, from foundations to final finishes with guaranteed commitment to deadlines.",
            "fas fa-tools",
            "construction",
        ),
        (
            "التصميم المعماري",
            "Architectural Design",
            "خدمات التصميم المعماري الإبداعي التي تجمع بين الوظيفية والجمال، مع مراعاة البيئة المحلية والثقافة السعودية والمعايير العالمية.",
            "Creative architectural design services that combine functionality and beauty, taking into account the local environment, Saudi culture and international standards.",
            "fas fa-drafting-compass",
            "design",
        ),
        (
            "التشطيبات الفاخرة",
            "Luxury Finishes",
            "تنفيذ أعمال التشطيبات بأجود المواد وأحدث التقنيات، لضمان نتائج تفوق التوقعات وتدوم طويلاً مع ضمان شامل على الأعمال.",
            "Implementation of finishing works with the finest materials and latest technologies, to ensure results that exceed expectations and last long with comprehensive warranty.",
            "fas fa-paint-brush",
            "finishing",
        ),
        (
            "تجهيز المنشآت التقنية",
            "Technical Facility Supply",
            "نقدم حلولاً شاملة لتجهيز الشركات والمكاتب والمدارس بأحدث الأجهزة التقنية. نوفر أجهزة كمبيوتر مكتبية ومحمولة، راوترات، مودمات، وأجهزة متنقلة من علامات تجارية موثوقة.",
            "We provide comprehensive solutions for equipping companies, offices and schools with the latest technical devices. We supply desktop and laptop computers, routers, modems, and mobile devices from trusted brands.",
            "fas fa-laptop",
            "technology",
        ),
    ];

    let created_at = timestamp::now();
    services
        .into_iter()
        .map(
            |(title, title_en, description, description_en, icon, category)| Service {
                id: new_id(),
                title: title.to_string(),
                title_en: Some(title_en.to_string()),
                description: description.to_string(),
                description_en: Some(description_en.to_string()),
                icon: icon.to_string(),
                category: category.to_string(),
                is_active: true,
                created_at,
            },
        )
        .collect()
}
