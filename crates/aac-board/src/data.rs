//! Default Board Data
//!
//! Korean core vocabulary: eight categories, emergency cards, verb
//! suggestions and situation boards.

use crate::catalog::{Category, SituationBoard, VerbSuggestions};
use aac_grammar::{Card, GrammarType, PictogramRef};

use GrammarType::*;

/// (id, text, pictogram keyword, role)
type CardRow = (&'static str, &'static str, &'static str, GrammarType);

const CATEGORIES: &[(&str, &str)] = &[
    ("person", "사람"),
    ("action", "동작"),
    ("feeling", "감정"),
    ("food", "음식"),
    ("place", "장소"),
    ("thing", "사물"),
    ("time", "시간"),
    ("expression", "표현"),
];

const PERSON: &[CardRow] = &[
    ("p_me", "나", "나", Pronoun),
    ("p_mom", "엄마", "엄마", Noun),
    ("p_dad", "아빠", "아빠", Noun),
    ("p_grandma", "할머니", "할머니", Noun),
    ("p_grandpa", "할아버지", "할아버지", Noun),
    ("p_sister", "언니/누나", "누나", Noun),
    ("p_brother", "오빠/형", "형", Noun),
    ("p_younger", "동생", "동생", Noun),
    ("p_teacher", "선생님", "선생님", Noun),
    ("p_friend", "친구", "친구", Noun),
    ("p_doctor", "의사", "의사", Noun),
    ("p_family", "가족", "가족", Noun),
];

const ACTION: &[CardRow] = &[
    ("a_do", "해요", "활동하다", Verb),
    ("a_go", "가요", "가다", Verb),
    ("a_come", "와요", "오다", Verb),
    ("a_see", "봐요", "보다", Verb),
    ("a_give", "줘요", "주다", Verb),
    ("a_eat", "먹어요", "먹다", Verb),
    ("a_drink", "마셔요", "마시다", Verb),
    ("a_sleep", "자요", "자다", Verb),
    ("a_sit", "앉아요", "앉다", Verb),
    ("a_stand", "서요", "서다", Verb),
    ("a_walk", "걸어요", "걷다", Verb),
    ("a_play", "놀아요", "놀다", Verb),
    ("a_wash", "씻어요", "씻다", Verb),
    ("a_wear", "입어요", "입다", Verb),
    ("a_read", "읽어요", "읽다", Verb),
    ("a_make", "만들어요", "만들다", Verb),
    ("a_wait", "기다려요", "기다리다", Verb),
    ("a_wakeup", "일어나요", "일어나다", Verb),
    ("a_open", "열어요", "열다", Verb),
    ("a_ride", "타요", "타다", Verb),
];

const FEELING: &[CardRow] = &[
    ("f_good", "좋아요", "좋다", Adjective),
    ("f_bad", "싫어요", "싫다", Adjective),
    ("f_happy", "행복해요", "행복하다", Adjective),
    ("f_sad", "슬퍼요", "슬프다", Adjective),
    ("f_angry", "화나요", "화나다", Adjective),
    ("f_scared", "무서워요", "무섭다", Adjective),
    ("f_hurt", "아파요", "아프다", Adjective),
    ("f_hungry", "배고파요", "배고프다", Adjective),
    ("f_thirsty", "목말라요", "목마르다", Adjective),
    ("f_sleepy", "졸려요", "졸리다", Adjective),
    ("f_tired", "피곤해요", "피곤하다", Adjective),
    ("f_bored", "심심해요", "심심하다", Adjective),
    ("f_fun", "재밌어요", "재미있다", Adjective),
    ("f_okay", "괜찮아요", "괜찮은", Adjective),
];

const FOOD: &[CardRow] = &[
    ("fd_rice", "밥", "밥", Noun),
    ("fd_bread", "빵", "빵", Noun),
    ("fd_soup", "국", "수프", Noun),
    ("fd_meat", "고기", "고기", Noun),
    ("fd_sidedish", "반찬", "반찬", Noun),
    ("fd_fruit", "과일", "과일", Noun),
    ("fd_kimchi", "김치", "김치", Noun),
    ("fd_noodle", "라면", "라면", Noun),
    ("fd_egg", "계란", "계란", Noun),
    ("fd_snack", "과자", "과자", Noun),
    ("fd_water", "물", "물", Noun),
    ("fd_milk", "우유", "우유", Noun),
    ("fd_juice", "주스", "주스", Noun),
    ("fd_yummy", "맛있어요", "맛있다", Adjective),
    ("fd_full", "배불러요", "배부르다", Adjective),
];

const PLACE: &[CardRow] = &[
    ("pl_home", "집", "집", Noun),
    ("pl_school", "학교", "학교", Noun),
    ("pl_hospital", "병원", "병원", Noun),
    ("pl_toilet", "화장실", "화장실", Noun),
    ("pl_mart", "마트", "마트", Noun),
    ("pl_park", "공원", "놀이터", Noun),
    ("pl_restaurant", "식당", "식당", Noun),
    ("pl_room", "방", "침실", Noun),
    ("pl_outside", "밖", "밖에", Noun),
    ("pl_car", "차", "자동차", Noun),
];

const THING: &[CardRow] = &[
    ("th_clothes", "옷", "옷", Noun),
    ("th_shoes", "신발", "신발", Noun),
    ("th_bag", "가방", "가방", Noun),
    ("th_phone", "핸드폰", "휴대폰", Noun),
    ("th_tv", "TV", "텔레비전", Noun),
    ("th_book", "책", "책", Noun),
    ("th_medicine", "약", "약", Noun),
    ("th_blanket", "이불", "이불", Noun),
    ("th_tissue", "휴지", "휴지", Noun),
    ("th_toy", "장난감", "장난감", Noun),
    ("th_ball", "공", "공", Noun),
    ("th_cup", "컵", "컵", Noun),
];

const TIME: &[CardRow] = &[
    ("tm_now", "지금", "지금", Adverb),
    ("tm_later", "나중에", "나중에", Adverb),
    ("tm_today", "오늘", "오늘", Noun),
    ("tm_tomorrow", "내일", "내일", Noun),
    ("tm_yesterday", "어제", "어제", Noun),
    ("tm_soon", "곧", "지금", Adverb),
    ("tm_morning", "아침", "아침", Noun),
    ("tm_evening", "저녁", "저녁", Noun),
    ("tm_always", "항상", "항상", Adverb),
    ("tm_sometimes", "가끔", "가끔", Adverb),
];

const EXPRESSION: &[CardRow] = &[
    ("ex_yes", "네", "네", Social),
    ("ex_no", "아니요", "아니", Social),
    ("ex_hello", "안녕", "안녕", Social),
    ("ex_thanks", "고마워요", "감사합니다", Social),
    ("ex_sorry", "미안해요", "미안해", Social),
    ("ex_night", "잘자", "잘자", Social),
    ("ex_want", "원해요", "원하다", Verb),
    ("ex_need", "필요해요", "필요하다", Verb),
    ("ex_please", "주세요", "주다", Request),
    ("ex_wait", "잠깐만요", "기다리다", Request),
    ("ex_more", "더", "더", Adverb),
    ("ex_not", "안", "아니다", Adverb),
    ("ex_again", "또", "다시", Adverb),
    ("ex_alot", "많이", "많이", Adverb),
    ("ex_fast", "빨리", "빠르다", Adverb),
    ("ex_what", "뭐예요?", "무엇", Question),
    ("ex_where", "어디예요?", "어디", Question),
    ("ex_who", "누구예요?", "누구", Question),
    ("ex_why", "왜요?", "왜", Question),
    ("ex_and", "그리고", "그리고", Adverb),
    ("ex_subj", "~이/가", "", Particle),
    ("ex_obj", "~을/를", "", Particle),
    ("ex_to", "~에", "", Particle),
    ("ex_at", "~에서", "", Particle),
    ("ex_with", "~하고", "", Particle),
    ("ex_give_to", "~한테", "", Particle),
    ("ex_also", "~도", "", Particle),
];

const EMERGENCY: &[(&str, &str, &str)] = &[
    ("em_help", "도와주세요", "도움"),
    ("em_pain", "아파요", "아프다"),
    ("em_toilet", "화장실 가요", "화장실"),
    ("em_water", "물 주세요", "물"),
    ("em_scared", "무서워요", "무섭다"),
    ("em_stop", "그만해요", "멈추다"),
];

const SUGGESTIONS: &[(&str, &[&str])] = &[
    ("a_eat", &["fd_rice", "fd_bread", "fd_fruit", "fd_snack"]),
    ("a_drink", &["fd_water", "fd_milk", "fd_juice"]),
    ("a_go", &["pl_home", "pl_school", "pl_hospital", "pl_park"]),
    ("a_ride", &["pl_car"]),
    ("a_read", &["th_book"]),
    ("a_wear", &["th_clothes", "th_shoes"]),
    ("a_play", &["th_toy", "th_ball"]),
];

/// (id, name, emoji, cards as (id, text, keyword))
type SituationRow = (&'static str, &'static str, &'static str, &'static [(&'static str, &'static str, &'static str)]);

const SITUATIONS: &[SituationRow] = &[
    ("home", "집", "🏠", &[
        ("sh_tv", "TV 봐요", "텔레비전"),
        ("sh_snack", "간식 줘요", "간식"),
        ("sh_play", "놀고 싶어요", "놀다"),
        ("sh_sleep", "자고 싶어요", "자다"),
        ("sh_hug", "안아줘요", "포옹"),
        ("sh_hot", "더워요", "덥다"),
        ("sh_cold", "추워요", "춥다"),
    ]),
    ("hospital", "병원", "🏥", &[
        ("sho_hurt", "아파요", "아프다"),
        ("sho_head", "머리 아파요", "머리"),
        ("sho_stomach", "배 아파요", "배고프다"),
        ("sho_fever", "열나요", "열"),
        ("sho_dizzy", "어지러워요", "어지럽다"),
        ("sho_medicine", "약 주세요", "약"),
        ("sho_done", "언제 끝나요?", "끝나다"),
    ]),
    ("restaurant", "식당", "🍽️", &[
        ("sr_hungry", "배고파요", "배고프다"),
        ("sr_water", "물 주세요", "물"),
        ("sr_yummy", "맛있어요", "맛있다"),
        ("sr_more", "더 주세요", "더"),
        ("sr_spicy", "매워요", "맵다"),
        ("sr_done", "다 먹었어요", "먹다"),
    ]),
    ("school", "학교", "🏫", &[
        ("ss_teacher", "선생님", "선생님"),
        ("ss_question", "질문 있어요", "질문"),
        ("ss_dontknow", "모르겠어요", "모르다"),
        ("ss_done", "다 했어요", "끝나다"),
        ("ss_toilet", "화장실 가도 돼요?", "화장실"),
        ("ss_again", "다시 설명해주세요", "설명하다"),
    ]),
    ("daycare", "어린이집", "🧒", &[
        ("sd_mom", "엄마 보고싶어요", "엄마"),
        ("sd_friend", "친구랑 놀아요", "친구"),
        ("sd_snack", "간식 먹어요", "간식"),
        ("sd_nap", "자고 싶어요", "자다"),
        ("sd_home", "집에 가요", "집"),
    ]),
    ("car", "차", "🚗", &[
        ("sc_arrive", "다 왔어요?", "도착하다"),
        ("sc_sick", "멀미나요", "멀미"),
        ("sc_window", "창문 열어요", "창문"),
        ("sc_music", "음악 틀어요", "음악"),
        ("sc_stop", "세워주세요", "멈추다"),
    ]),
    ("park", "공원", "🌳", &[
        ("spk_swing", "그네 타요", "그네"),
        ("spk_slide", "미끄럼틀 타요", "미끄럼틀"),
        ("spk_run", "뛰어요", "뛰다"),
        ("spk_tired", "힘들어요", "힘들다"),
        ("spk_more", "더 놀아요", "놀다"),
    ]),
    ("mart", "마트", "🛒", &[
        ("sm_want", "이거 사요", "사다"),
        ("sm_snack", "과자 사요", "과자"),
        ("sm_heavy", "무거워요", "무겁다"),
        ("sm_cart", "카트 타요", "카트"),
        ("sm_carry", "들어줘요", "들다"),
    ]),
    ("bath", "목욕", "🛁", &[
        ("sb_hot", "뜨거워요", "뜨겁다"),
        ("sb_cold", "차가워요", "차갑다"),
        ("sb_soap", "비누 줘요", "비누"),
        ("sb_towel", "수건 줘요", "수건"),
        ("sb_out", "나갈래요", "나가다"),
    ]),
];

/// Category situation cards are filed under once selected
pub const SITUATION_CARD_CATEGORY: &str = "expression";

fn build_cards(category: &str, rows: &[CardRow]) -> Vec<Card> {
    rows.iter()
        .map(|&(id, text, keyword, grammar)| {
            let card = Card::new(id, text, category).with_grammar(grammar);
            if keyword.is_empty() {
                card
            } else {
                card.with_pictogram(PictogramRef::Keyword(keyword.to_string()))
            }
        })
        .collect()
}

pub fn default_categories() -> Vec<Category> {
    CATEGORIES.iter().map(|&(id, name)| Category::new(id, name)).collect()
}

/// Default cards per category, in category order
pub fn default_cards() -> Vec<(String, Vec<Card>)> {
    let tables: [(&str, &[CardRow]); 8] = [
        ("person", PERSON),
        ("action", ACTION),
        ("feeling", FEELING),
        ("food", FOOD),
        ("place", PLACE),
        ("thing", THING),
        ("time", TIME),
        ("expression", EXPRESSION),
    ];
    tables
        .iter()
        .map(|&(category, rows)| (category.to_string(), build_cards(category, rows)))
        .collect()
}

pub fn emergency_cards() -> Vec<Card> {
    EMERGENCY
        .iter()
        .map(|&(id, text, keyword)| Card::emergency(id, text).with_keyword(keyword))
        .collect()
}

pub fn verb_suggestions() -> VerbSuggestions {
    let mut suggestions = VerbSuggestions::new();
    for &(verb, ids) in SUGGESTIONS {
        suggestions.insert(verb, ids.iter().map(|s| s.to_string()).collect());
    }
    suggestions
}

pub fn situation_boards() -> Vec<SituationBoard> {
    SITUATIONS
        .iter()
        .map(|&(id, name, emoji, cards)| SituationBoard {
            id: id.to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
            cards: cards
                .iter()
                .map(|&(card_id, text, keyword)| {
                    Card::new(card_id, text, SITUATION_CARD_CATEGORY).with_keyword(keyword)
                })
                .collect(),
        })
        .collect()
}
