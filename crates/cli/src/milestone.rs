//! Content of the Milestone One presentation for the University E-Voting System.

use docgen_core::{Font, Pt, Result, RgbColor};
use docgen_pptx::DeckBuilder;
use std::path::Path;

pub const BACKEND_REPO_URL: &str = "https://github.com/JDanielZ5G/Evoting-Backend-API.git";
pub const MOBILE_REPO_URL: &str = "https://github.com/JDanielZ5G/Evoting_mobile_group3.git";

/// Slide titles in deck order.
pub const SLIDE_TITLES: [&str; 14] = [
    "University E-Voting System",
    "Project Overview",
    "Key Features",
    "Stakeholder Mapping",
    "Voter Journey",
    "Candidate Journey",
    "Admin & Officer Journey",
    "Entity Relationship Diagram",
    "Technology Stack: Backend",
    "Technology Stack: Mobile",
    "Security & Risk Mitigation",
    "Development Workflow",
    "Future Plans",
    "Thank You",
];

const LINK_COLOR: RgbColor = RgbColor(0, 0, 255);
const BODY_SIZE: Pt = Pt(18.0);

/// Assemble all fourteen slides. Journey and ERD images are looked up in
/// `image_dir`; missing ones become a notice on their slide.
pub fn build_milestone_deck(image_dir: &Path) -> Result<DeckBuilder> {
    let mut deck = DeckBuilder::new();

    deck.add_title_slide(
        SLIDE_TITLES[0],
        "Milestone One: Discovery & Architecture\nDecember 2025",
    )?;

    deck.add_content_slide(
        SLIDE_TITLES[1],
        &[
            "🎯 Objective: Secure, accessible digital voting platform",
            "📱 Mobile-first architecture with React Native",
            "🔐 OTP-based authentication for voters",
            "🏛️ Role-based access (Admin, Officer, Candidate, Voter)",
            "📊 Real-time results and audit logging",
        ],
    )?;

    deck.add_content_slide(
        SLIDE_TITLES[2],
        &[
            "✅ Voter Authentication via OTP (Email)",
            "✅ Candidate Nomination & Approval Workflow",
            "✅ Secret Ballot with Single-use Tokens",
            "✅ Real-time Vote Counting & Results",
            "✅ Immutable Audit Logs",
            "✅ Admin Dashboard for Election Management",
        ],
    )?;

    deck.add_content_slide(
        SLIDE_TITLES[3],
        &[
            "👤 Administrators - System configuration & oversight",
            "👤 Returning Officers - Nomination approval & monitoring",
            "👤 Candidates - Submit nominations & manifestos",
            "👤 Voters - Verify identity & cast votes",
        ],
    )?;

    deck.add_image_slide(SLIDE_TITLES[4], image_dir.join("voter_journey.png"))?;
    deck.add_image_slide(SLIDE_TITLES[5], image_dir.join("candidate_journey.png"))?;
    deck.add_image_slide(SLIDE_TITLES[6], image_dir.join("admin_journey.png"))?;
    deck.add_image_slide(SLIDE_TITLES[7], image_dir.join("erd.png"))?;

    deck.add_content_slide(
        SLIDE_TITLES[8],
        &[
            "⚙️ Runtime: Node.js",
            "🚀 Framework: Express.js",
            "💾 Database: MySQL",
            "🔧 ORM: Prisma",
            "🔐 Authentication: JWT + Bcrypt",
            "📧 Email: Nodemailer",
        ],
    )?;

    deck.add_content_slide(
        SLIDE_TITLES[9],
        &[
            "📱 Framework: React Native (Expo)",
            "💻 Language: JavaScript",
            "🔄 State Management: Context API",
            "💾 Storage: AsyncStorage",
            "🌐 Networking: Axios",
        ],
    )?;

    deck.add_content_slide(
        SLIDE_TITLES[10],
        &[
            "🔒 Role-Based Access Control (RBAC)",
            "🔑 Two-Factor Authentication (Reg No + OTP)",
            "🎫 Single-use Ballot Tokens",
            "📝 Immutable Audit Logs",
            "🔐 Encrypted Password Storage (Bcrypt)",
            "⚡ Rate Limiting on API endpoints",
        ],
    )?;

    add_workflow_slide(&mut deck)?;

    deck.add_content_slide(
        SLIDE_TITLES[12],
        &[
            "🔐 Biometric Authentication (FaceID/TouchID)",
            "⛓️ Blockchain Integration for vote hashes",
            "📲 Push Notifications for real-time updates",
            "🌍 Multi-language Support",
            "📊 Advanced Analytics Dashboard",
        ],
    )?;

    deck.add_title_slide(
        SLIDE_TITLES[13],
        "Questions?\n\nUniversity E-Voting System\nMilestone One Presentation",
    )?;

    Ok(deck)
}

fn body_font() -> Font {
    Font {
        size: Some(BODY_SIZE),
        ..Font::default()
    }
}

/// Repository links with hyperlinked runs, followed by process bullets.
fn add_workflow_slide(deck: &mut DeckBuilder) -> Result<()> {
    log::info!("Adding Development Workflow slide");
    let slide = deck.add_slide(1)?;
    if let Some(title) = slide.title_mut() {
        title.set_text(SLIDE_TITLES[11]);
    }

    let body = slide.placeholder_mut(1)?;
    body.clear();

    let heading = body.add_paragraph();
    heading.set_text("📦 Two Repositories:");
    heading.font = body_font();

    for (label, link_text, url) in [
        ("   • Backend API: ", "Evoting-Backend-API", BACKEND_REPO_URL),
        ("   • Mobile App: ", "Evoting_mobile_group3", MOBILE_REPO_URL),
    ] {
        let paragraph = body.add_paragraph();
        paragraph.set_level(0);

        let run = paragraph.add_run();
        run.text = label.to_string();
        run.font = body_font();

        let link = paragraph.add_run();
        link.text = link_text.to_string();
        link.font = Font {
            color: Some(LINK_COLOR),
            underline: Some(true),
            ..body_font()
        };
        link.set_hyperlink(url);
    }

    for item in [
        "🌿 Feature-branch workflow",
        "✅ GitHub Actions CI/CD",
        "📝 Conventional Commits",
        "🧪 Automated Testing",
    ] {
        let paragraph = body.add_paragraph();
        paragraph.set_text(item);
        paragraph.font = body_font();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgen_core::Shape;
    use docgen_pptx::PptxParser;
    use std::io::Cursor;

    fn deck_without_images() -> (tempfile::TempDir, DeckBuilder) {
        let dir = tempfile::tempdir().unwrap();
        let deck = build_milestone_deck(dir.path()).unwrap();
        (dir, deck)
    }

    #[test]
    fn test_fourteen_slides_in_order() {
        let (_dir, builder) = deck_without_images();
        let deck = builder.deck();
        assert_eq!(deck.slide_count(), 14);

        let titles: Vec<String> = deck.slides().iter().filter_map(|s| s.title()).collect();
        assert_eq!(titles, SLIDE_TITLES);
        assert_eq!(deck.slides()[13].layout_index(), 0);
    }

    #[test]
    fn test_missing_images_fall_back_to_notice() {
        let (dir, builder) = deck_without_images();
        let slide = &builder.deck().slides()[4];
        assert_eq!(slide.pictures().count(), 0);

        let expected = format!(
            "Image not found: {}",
            dir.path().join("voter_journey.png").display()
        );
        assert!(slide.shapes().iter().any(|s| matches!(
            s,
            Shape::TextBox(tb) if tb.text_frame.text() == expected
        )));
    }

    #[test]
    fn test_workflow_slide_links() {
        let (_dir, builder) = deck_without_images();
        let slide = &builder.deck().slides()[11];
        let body = slide
            .shapes()
            .iter()
            .filter_map(Shape::text_frame)
            .nth(1)
            .unwrap();

        let links: Vec<&str> = body
            .paragraphs()
            .iter()
            .flat_map(|p| &p.runs)
            .filter_map(|r| r.hyperlink.as_deref())
            .collect();
        assert_eq!(links, vec![BACKEND_REPO_URL, MOBILE_REPO_URL]);

        let link_run = &body.paragraphs()[2].runs[1];
        assert_eq!(link_run.text, "Evoting-Backend-API");
        assert_eq!(link_run.font.color, Some(RgbColor(0, 0, 255)));
        assert_eq!(link_run.font.underline, Some(true));
        assert_eq!(link_run.font.size, Some(Pt(18.0)));
    }

    #[test]
    fn test_written_deck_reads_back() {
        let (dir, builder) = deck_without_images();
        let path = dir.path().join("docs").join("deck.pptx");
        builder.save(&path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let slides = PptxParser::new().parse(file).unwrap();
        assert_eq!(slides.len(), 14);
        assert_eq!(slides[11].hyperlinks, vec![BACKEND_REPO_URL, MOBILE_REPO_URL]);
        assert!(slides[11].contains_text("   • Backend API: Evoting-Backend-API"));
        assert!(slides[4].contains_text("Image not found: "));
        assert_eq!(slides[4].picture_count, 0);
        assert_eq!(slides[13].title(), Some("Thank You"));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let (dir, first) = deck_without_images();
        let second = build_milestone_deck(dir.path()).unwrap();

        let first_bytes = first.to_bytes().unwrap();
        let second_bytes = second.to_bytes().unwrap();
        assert_eq!(first_bytes, second_bytes);

        let a = PptxParser::new().parse(Cursor::new(first_bytes)).unwrap();
        let b = PptxParser::new().parse(Cursor::new(second_bytes)).unwrap();
        let text = |slides: &[docgen_core::ExtractedSlide]| -> Vec<Vec<String>> {
            slides
                .iter()
                .map(|s| s.lines.iter().map(|l| l.text.clone()).collect())
                .collect()
        };
        assert_eq!(text(&a), text(&b));
    }
}
