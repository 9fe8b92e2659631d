//! Sample gallery projects and customer reviews.

use chrono::{DateTime, Duration, Utc};
use database::{Project, Review};

/// Number of leading projects marked as featured.
const FEATURED_COUNT: usize = 8;

const LOCATION: &str = "المملكة العربية السعودية";

/// (image URL, title, description, category)
const PROJECTS: [(&str, &str, &str, &str); 12] = [
    ("https://i.ibb.co/vv1YCV0X/unnamed-13.webp", "تصميم مكتب فاخر في السعودية", "أثاث إيطالي يدوي الصنع", "مكاتب"),
    ("https://i.ibb.co/K898SWs/2025-02-25-7.webp", "صالة معيشة فاخرة بطراز عصري", "واحة الفخامة العصرية", "غرف معيشة"),
    ("https://i.ibb.co/4g8qr5gJ/unnamed-11.webp", "ديكور صالة فاخرة سعودية", "أناقة تتجسد في كل التفاصيل", "غرف معيشة"),
    ("https://i.ibb.co/sLhjdXM/unnamed-12.webp", "تصميم فيلا فاخرة - الرياض", "مشروع متكامل للديكور الداخلي", "فلل"),
    ("https://i.ibb.co/KzbyP5CZ/unnamed-10.webp", "تصميم خارجي وتنسيق حدائق", "لمسة طبيعية خلابة", "حدائق"),
    ("https://i.ibb.co/KzfcCL55/2025-02-25-6.webp", "واجهة معمارية حديثة", "تصميم عصري بلمسة فنية", "واجهات"),
    ("https://i.ibb.co/xK3hkmQ4/2025-02-25-4.webp", "ديكور داخلي متميز", "جمال وأناقة في كل زاوية", "ديكور داخلي"),
    ("https://i.ibb.co/h11p2wmw/2025-02-25-5.webp", "تصميم حديث للمساحات", "إبداع في التفاصيل", "ديكور داخلي"),
    ("https://i.ibb.co/TMMJNSKP/unnamed-8.webp", "ديكور فاخر للمنازل", "لمسة ملكية راقية", "منازل"),
    ("https://i.ibb.co/fVG1GK1Z/unnamed-9.webp", "تصميم معماري متطور", "عمارة حديثة بروح عربية", "معماري"),
    ("https://i.ibb.co/MxSd9d1T/unnamed-7.webp", "ديكور خارجي رائع", "جمال الطبيعة مع الفن", "ديكور خارجي"),
    ("https://i.ibb.co/4R5xyZHz/2024-12-23.webp", "تصميم عصري للمكاتب", "بيئة عمل محفزة ومريحة", "مكاتب"),
];

/// (name, rating, text)
const REVIEWS: [(&str, i64, &str); 10] = [
    ("أحمد السعيد", 5, "خدمة ممتازة وفريق عمل محترف جداً! نفذوا مشروع ديكور منزلي بدقة وإتقان فاق التوقعات."),
    ("فاطمة الزهراني", 5, "أفضل شركة ديكور تعاملت معها في السعودية. الجودة عالية والأسعار مناسبة والالتزام بالمواعيد ممتاز."),
    ("محمد العتيبي", 5, "تجربة رائعة مع شركة المستودعات السوداء. صمموا مكتبي بشكل احترافي وبلمسة عصرية مميزة."),
    ("نورا القحطاني", 4, "فريق عمل متميز وخدمة عملاء ممتازة. أنصح بالتعامل معهم لجميع أعمال الديكور والتشطيبات."),
    ("عبدالله المطيري", 5, "مذهل! حولوا بيتي إلى تحفة فنية. كل التفاصيل نُفذت بعناية فائقة ومواد عالية الجودة."),
    ("سارة الدوسري", 4, "جودة العمل جيدة جداً والتصاميم إبداعية. سأوصي بهم لأصدقائي بكل ثقة."),
    ("خالد الشمري", 5, "أفضل تجربة ديكور في حياتي! الفريق محترف والنتائج تفوق الخيال. شكراً لكم."),
    ("ريم العنزي", 4, "خدمة ممتازة وأسعار تنافسية. التزموا بالمواعيد والنتيجة النهائية أكثر من رائعة."),
    ("يوسف الحربي", 5, "تعامل راقي واهتمام بالتفاصيل. نفذوا مشروع تصميم المطعم بطريقة احترافية مميزة."),
    ("مريم البقمي", 4, "فريق عمل ودود ومتعاون. الديكور جميل والتشطيبات عالية الجودة. أنصح بالتعامل معهم."),
];

/// Twelve gallery projects with ids `project_1..=project_12`.
///
/// Creation dates step back 15 days per entry, so the first project is the newest.
pub fn projects(now: DateTime<Utc>) -> Vec<Project> {
    PROJECTS
        .iter()
        .enumerate()
        .map(|(i, (image_url, title, description, category))| {
            let step = i as i64;
            Project {
                id: format!("project_{}", i + 1),
                title: title.to_string(),
                title_en: None,
                description: description.to_string(),
                description_en: None,
                image_url: image_url.to_string(),
                category: category.to_string(),
                location: Some(LOCATION.to_string()),
                completion_date: Some(now - Duration::days(30 + 25 * step)),
                is_featured: i < FEATURED_COUNT,
                is_active: true,
                created_at: now - Duration::days(1 + 15 * step),
            }
        })
        .collect()
}

/// Ten verified reviews with ids `review_1..=review_10`, dated 30 to 165 days ago.
pub fn reviews(now: DateTime<Utc>) -> Vec<Review> {
    REVIEWS
        .iter()
        .enumerate()
        .map(|(i, (name, rating, text))| Review {
            id: format!("review_{}", i + 1),
            name: name.to_string(),
            rating: *rating,
            text: text.to_string(),
            date: now - Duration::days(30 + 15 * i as i64),
            is_verified: true,
            is_active: true,
            google_review_id: Some(format!("google_review_{}", i + 1)),
        })
        .collect()
}
