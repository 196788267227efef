use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::claude::{ClaudeClient, GenerationError};
use crate::art::seed::{derive_seed, seeded_rng};
use crate::models::scene::{Language, SceneRequest, SceneRole, SceneSource};

const TITLE_PROMPT_CHARS: usize = 40;
const BEATS_PER_SCENE: usize = 3;

/// Fixed wording for the offline generator, one table per language.
struct Templates {
    scene_tag: &'static str,
    title: &'static str,
    created_at: &'static str,
    role: &'static str,
    tone: &'static str,
    length: &'static str,
    summary: &'static str,
    beats_header: &'static str,
    characters_header: &'static str,
    character_note: &'static str,
    no_characters: &'static str,
    script_header: &'static str,
    director_header: &'static str,
    beats: [&'static str; 4],
    lines: [&'static str; 5],
    actions: [&'static str; 3],
    cinematographer_notes: [&'static str; 2],
    playwright_notes: [&'static str; 2],
    general_note: &'static str,
}

static EN: Templates = Templates {
    scene_tag: "[Scene]",
    title: "Title",
    created_at: "Created at",
    role: "Role",
    tone: "Tone",
    length: "Length",
    summary: "One-sentence summary:",
    beats_header: "Key beats:",
    characters_header: "Characters & notes:",
    character_note: "brief note (personality/goal)",
    no_characters: "None provided",
    script_header: "Sample script:",
    director_header: "Director notes:",
    beats: [
        "Start: An awkward silence settles in.",
        "Middle: Tension erupts and a secret is revealed.",
        "Climax: A decisive moment forces a choice.",
        "End: The scene closes on a resonant line.",
    ],
    lines: [
        "\"If you hadn't been there then, I'd be nothing.\"",
        "\"That's none of your business.\"",
        "\"I'm sorry. I didn't know either.\"",
        "\"Even if it's not the ending we wanted, we have to survive.\"",
        "\"Be quiet. This isn't the time to talk.\"",
    ],
    actions: ["turns away.", "clenches a fist.", "avoids eye contact."],
    cinematographer_notes: [
        "Shot1: Close-up for emotion / slow zoom out",
        "Lighting: low-key, cool blue tones",
    ],
    playwright_notes: [
        "Stage: minimal props, single doorway",
        "Acting note: speak slowly, use long breaths",
    ],
    general_note: "(role-based general suggestions) emphasize emotional rhythm and pacing",
};

static KO: Templates = Templates {
    scene_tag: "[장면]",
    title: "제목",
    created_at: "생성일시",
    role: "선택 롤",
    tone: "톤",
    length: "길이",
    summary: "요약(한 문장):",
    beats_header: "핵심 비트:",
    characters_header: "등장인물 및 메모:",
    character_note: "간단 메모 (성격/목표)",
    no_characters: "없음 (입력하지 않음)",
    script_header: "장면 대본 (샘플):",
    director_header: "연출 메모:",
    beats: [
        "시작: 불편한 침묵이 흐른다.",
        "중반: 갈등이 폭발하고 비밀이 드러난다.",
        "클라이맥스: 선택의 순간이 온다.",
        "엔딩: 여운이 남는 한 문장으로 마무리.",
    ],
    lines: [
        "“그때 네가 없었더라면 난 아무것도 아니었을 거야.”",
        "“그건 네가 알 바 아니야.”",
        "“미안해. 나도 몰랐어.”",
        "“우리가 원한 결말은 아니더라도 살아야 해.”",
        "“조용히 해. 지금 말하면 안 돼.”",
    ],
    actions: ["몸을 돌린다.", "주먹을 쥔다.", "눈을 피한다."],
    cinematographer_notes: [
        "샷1: 클로즈업으로 감정 전달 / 느린 줌 아웃",
        "조명: 저채도, 차가운 블루 톤",
    ],
    playwright_notes: [
        "무대: 단출한 소품, 문 하나",
        "배우지시: 천천히 말하되 숨을 길게 사용",
    ],
    general_note: "(역할 기반 일반 추천) 감정선 강조, 리듬 조절",
};

fn templates(language: Language) -> &'static Templates {
    match language {
        Language::En => &EN,
        Language::Ko => &KO,
    }
}

/// Names from the comma separated `characters` field, blanks dropped.
pub fn parse_characters(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Same prompt, role and tone always give the same local scene.
pub fn scene_seed(req: &SceneRequest) -> u64 {
    derive_seed([
        req.prompt.as_str(),
        req.role.display_name(Language::En),
        req.tone.as_str(),
    ])
}

/// Offline scene script built from fixed templates.
pub fn local_scene<R: Rng + ?Sized>(
    req: &SceneRequest,
    created_at: DateTime<Utc>,
    rng: &mut R,
) -> String {
    let t = templates(req.language);
    let role_name = req.role.display_name(req.language);
    let prompt_head: String = req.prompt.chars().take(TITLE_PROMPT_CHARS).collect();
    let title = format!("{} {}", t.scene_tag, prompt_head.trim());

    let mut beats: Vec<&str> = t
        .beats
        .choose_multiple(rng, BEATS_PER_SCENE)
        .copied()
        .collect();
    beats.shuffle(rng);
    let mut lines = t.lines.to_vec();
    lines.shuffle(rng);

    let characters = parse_characters(&req.characters);
    let speakers: &[&str] = if characters.is_empty() {
        &["A", "B"]
    } else {
        &characters
    };

    let mut out = vec![
        format!("{}: {}", t.title, title),
        format!("{}: {}", t.created_at, created_at.format("%Y-%m-%d %H:%M")),
        format!(
            "{}: {} / {}: {} / {}: {}",
            t.role, role_name, t.tone, req.tone, t.length, req.length
        ),
        String::new(),
        t.summary.to_string(),
        format!("- {}", req.prompt),
        String::new(),
        t.beats_header.to_string(),
    ];
    out.extend(beats.iter().map(|b| format!("- {b}")));
    out.push(String::new());

    out.push(t.characters_header.to_string());
    if characters.is_empty() {
        out.push(format!("- {}", t.no_characters));
    } else {
        out.extend(
            characters
                .iter()
                .map(|c| format!("- {}: {}", c, t.character_note)),
        );
    }
    out.push(String::new());

    out.push(t.script_header.to_string());
    out.push(String::new());
    for (i, line) in lines.iter().enumerate() {
        let speaker = speakers.choose(rng).copied().unwrap_or("A");
        let action = t.actions.choose(rng).copied().unwrap_or_default();
        out.push(format!("{speaker}: {line}"));
        out.push(format!("    (Action) {action}"));
        if (i + 1) % 2 == 0 {
            out.push(String::new());
        }
    }
    out.push(String::new());

    out.push(t.director_header.to_string());
    match req.role {
        SceneRole::Cinematographer => {
            out.extend(t.cinematographer_notes.iter().map(|n| format!("- {n}")))
        }
        SceneRole::Playwright => out.extend(t.playwright_notes.iter().map(|n| format!("- {n}"))),
        _ => out.push(format!("- {}", t.general_note)),
    }

    out.join("\n")
}

/// User turn for the completion API.
pub fn user_message(req: &SceneRequest) -> String {
    match req.language {
        Language::En => format!(
            "Scene description: {}\nCharacters (comma separated): {}\nTone: {}\nDesired length: {}\n\n\
             Request: From the perspective of the selected role, write a scene script including \
             one-sentence summary, key beats, character actions, sample dialogue, and \
             directing/visual notes.",
            req.prompt, req.characters, req.tone, req.length
        ),
        Language::Ko => format!(
            "장면 설명: {}\n등장인물(콤마로 구분): {}\n톤: {}\n원하는 길이: {}\n\n\
             요청: 선택된 롤 관점으로 한 문장 요약, 핵심 비트, 등장인물 행동, 대사 예시, \
             연출/촬영/연기 지시를 포함한 장면 대본을 작성해 주세요.",
            req.prompt, req.characters, req.tone, req.length
        ),
    }
}

/// `scene_<Role_Name>_<lang>_<YYYYmmdd_HHMMSS>.txt`
pub fn scene_file_name(req: &SceneRequest, now: DateTime<Utc>) -> String {
    format!(
        "scene_{}_{}_{}.txt",
        req.role.display_name(Language::En).replace(' ', "_"),
        req.language.code(),
        now.format("%Y%m%d_%H%M%S")
    )
}

#[derive(Debug)]
pub struct GeneratedScene {
    pub content: String,
    pub source: SceneSource,
    pub fallback_reason: Option<String>,
}

/// Completion API when requested, otherwise the local template. A failed
/// API call falls back to the template unless the request forbids it.
pub async fn generate_scene(
    claude: &ClaudeClient,
    req: &SceneRequest,
    now: DateTime<Utc>,
) -> Result<GeneratedScene, GenerationError> {
    let fallback = |reason: Option<String>| GeneratedScene {
        content: local_scene(req, now, &mut seeded_rng(scene_seed(req))),
        source: SceneSource::Local,
        fallback_reason: reason,
    };

    if !req.use_ai {
        return Ok(fallback(None));
    }

    let system = req.role.instruction(req.language);
    match claude.complete(system, &user_message(req)).await {
        Ok(content) => Ok(GeneratedScene {
            content,
            source: SceneSource::Claude,
            fallback_reason: None,
        }),
        Err(e) if req.allow_fallback => {
            tracing::warn!(error = %e, "Claude API unavailable, using local scene template");
            Ok(fallback(Some(e.to_string())))
        }
        Err(e) => Err(e),
    }
}
