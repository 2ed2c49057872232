use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::error::{Result, UnoError};
use crate::game::{ColorChoice, Game, PlayerChoice};

#[derive(
    Clone, Copy, Debug, Display, EnumString, EnumCountMacro, EnumIter, PartialEq, Eq, Hash,
)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Teal,
    Pink,
    Purple,
    Orange,
    Wild,
}

impl Color {
    pub const LIGHT: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];
    pub const DARK: [Color; 4] = [Color::Teal, Color::Pink, Color::Purple, Color::Orange];

    /// The colors a player may declare after a wild while `side` is up.
    pub fn declarable(side: Side) -> &'static [Color; 4] {
        match side {
            Side::Light => &Color::LIGHT,
            Side::Dark => &Color::DARK,
        }
    }

    pub fn is_declarable_on(self, side: Side) -> bool {
        Color::declarable(side).contains(&self)
    }
}

/// Which half of a double-sided card is face up for the whole match.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    Light,
    Dark,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Number(u8),
    Skip,
    SkipEveryone,
    Reverse,
    DrawOne,
    DrawTwo,
    DrawFive,
    Flip,
    Wild,
    WildDrawFour,
    WildDrawTwo,
    WildDrawColor,
    AllWild,
    AllWildDrawTwo,
    AllWildDrawFour,
    AllWildReverse,
    AllWildSkip,
    AllWildSkipTwo,
    AllWildTargetedDrawTwo,
    AllWildForcedSwap,
    Back,
}

impl Value {
    pub fn is_wild(self) -> bool {
        matches!(
            self,
            Value::Wild | Value::WildDrawFour | Value::WildDrawTwo | Value::WildDrawColor
        ) || self.is_all_wild()
    }

    /// Members of the all-wild family never ask for a color.
    pub fn is_all_wild(self) -> bool {
        matches!(
            self,
            Value::AllWild
                | Value::AllWildDrawTwo
                | Value::AllWildDrawFour
                | Value::AllWildReverse
                | Value::AllWildSkip
                | Value::AllWildSkipTwo
                | Value::AllWildTargetedDrawTwo
                | Value::AllWildForcedSwap
        )
    }

    pub fn points(self) -> u32 {
        match self {
            Value::Number(number) => number.into(),
            Value::DrawOne => 10,
            Value::Skip | Value::Reverse | Value::DrawTwo | Value::DrawFive | Value::Flip => 20,
            Value::SkipEveryone => 30,
            Value::Wild | Value::WildDrawFour | Value::WildDrawTwo => 50,
            Value::WildDrawColor => 60,
            Value::AllWild | Value::AllWildDrawTwo | Value::AllWildReverse | Value::AllWildSkip => {
                20
            }
            Value::AllWildSkipTwo | Value::AllWildTargetedDrawTwo => 40,
            Value::AllWildDrawFour | Value::AllWildForcedSwap => 50,
            Value::Back => 0,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{number}"),
            Value::Skip => write!(f, "Skip"),
            Value::SkipEveryone => write!(f, "Skip Everyone"),
            Value::Reverse => write!(f, "Reverse"),
            Value::DrawOne => write!(f, "Draw One"),
            Value::DrawTwo => write!(f, "Draw Two"),
            Value::DrawFive => write!(f, "Draw Five"),
            Value::Flip => write!(f, "Flip"),
            Value::Wild | Value::AllWild => write!(f, "Wild"),
            Value::WildDrawFour | Value::AllWildDrawFour => write!(f, "Wild Draw Four"),
            Value::WildDrawTwo | Value::AllWildDrawTwo => write!(f, "Wild Draw Two"),
            Value::WildDrawColor => write!(f, "Wild Draw Color"),
            Value::AllWildReverse => write!(f, "Wild Reverse"),
            Value::AllWildSkip => write!(f, "Wild Skip"),
            Value::AllWildSkipTwo => write!(f, "Wild Skip Two"),
            Value::AllWildTargetedDrawTwo => write!(f, "Wild Targeted Draw Two"),
            Value::AllWildForcedSwap => write!(f, "Wild Forced Swap"),
            Value::Back => write!(f, "Back"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardFace {
    pub color: Color,
    pub value: Value,
}

impl Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Color::Wild => write!(f, "{}", self.value),
            color => write!(f, "{} {}", color, self.value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectionalAction {
    Skip(usize),
    SkipEveryone,
    Reverse,
    Draw(u32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WildEffect {
    pub draw_amount: u32,
    pub color_choice: Option<ColorChoice>,
    pub player_choice: Option<PlayerChoice>,
    pub skip_count: usize,
    pub reverses: bool,
}

/// What one side of a card does when it is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SideBehavior {
    Numeric(CardFace),
    Directional(CardFace, DirectionalAction),
    Flip(CardFace),
    Wild(CardFace, WildEffect),
    /// The missing reverse of a single-sided card. Never playable.
    Back,
}

const BACK_FACE: CardFace = CardFace {
    color: Color::Wild,
    value: Value::Back,
};

impl SideBehavior {
    /// Builds the behavior printed as `value`. Wild values ignore `color`.
    pub fn new(color: Color, value: Value) -> Self {
        let face = CardFace { color, value };
        let wild = CardFace {
            color: Color::Wild,
            value,
        };
        let declare = Some(ColorChoice::Declare);

        match value {
            Value::Number(_) => SideBehavior::Numeric(face),
            Value::Skip => SideBehavior::Directional(face, DirectionalAction::Skip(1)),
            Value::SkipEveryone => SideBehavior::Directional(face, DirectionalAction::SkipEveryone),
            Value::Reverse => SideBehavior::Directional(face, DirectionalAction::Reverse),
            Value::DrawOne => SideBehavior::Directional(face, DirectionalAction::Draw(1)),
            Value::DrawTwo => SideBehavior::Directional(face, DirectionalAction::Draw(2)),
            Value::DrawFive => SideBehavior::Directional(face, DirectionalAction::Draw(5)),
            Value::Flip => SideBehavior::Flip(face),
            Value::Wild => SideBehavior::Wild(
                wild,
                WildEffect {
                    color_choice: declare,
                    ..Default::default()
                },
            ),
            Value::WildDrawFour => SideBehavior::Wild(
                wild,
                WildEffect {
                    draw_amount: 4,
                    color_choice: declare,
                    skip_count: 1,
                    ..Default::default()
                },
            ),
            Value::WildDrawTwo => SideBehavior::Wild(
                wild,
                WildEffect {
                    draw_amount: 2,
                    color_choice: declare,
                    skip_count: 1,
                    ..Default::default()
                },
            ),
            Value::WildDrawColor => SideBehavior::Wild(
                wild,
                WildEffect {
                    color_choice: Some(ColorChoice::DrawUntilMatch),
                    skip_count: 1,
                    ..Default::default()
                },
            ),
            Value::AllWild => SideBehavior::Wild(wild, WildEffect::default()),
            Value::AllWildDrawTwo => SideBehavior::Wild(
                wild,
                WildEffect {
                    draw_amount: 2,
                    skip_count: 1,
                    ..Default::default()
                },
            ),
            Value::AllWildDrawFour => SideBehavior::Wild(
                wild,
                WildEffect {
                    draw_amount: 4,
                    skip_count: 1,
                    ..Default::default()
                },
            ),
            Value::AllWildReverse => SideBehavior::Wild(
                wild,
                WildEffect {
                    reverses: true,
                    ..Default::default()
                },
            ),
            Value::AllWildSkip => SideBehavior::Wild(
                wild,
                WildEffect {
                    skip_count: 1,
                    ..Default::default()
                },
            ),
            Value::AllWildSkipTwo => SideBehavior::Wild(
                wild,
                WildEffect {
                    skip_count: 2,
                    ..Default::default()
                },
            ),
            Value::AllWildTargetedDrawTwo => SideBehavior::Wild(
                wild,
                WildEffect {
                    player_choice: Some(PlayerChoice::TargetedDraw(2)),
                    ..Default::default()
                },
            ),
            Value::AllWildForcedSwap => SideBehavior::Wild(
                wild,
                WildEffect {
                    player_choice: Some(PlayerChoice::ForcedSwap),
                    ..Default::default()
                },
            ),
            Value::Back => SideBehavior::Back,
        }
    }

    pub fn face(&self) -> CardFace {
        match self {
            SideBehavior::Numeric(face)
            | SideBehavior::Directional(face, _)
            | SideBehavior::Flip(face)
            | SideBehavior::Wild(face, _) => *face,
            SideBehavior::Back => BACK_FACE,
        }
    }

    pub fn color(&self) -> Color {
        self.face().color
    }

    pub fn value(&self) -> Value {
        self.face().value
    }

    pub fn is_back(&self) -> bool {
        matches!(self, SideBehavior::Back)
    }

    fn is_valid_face(&self) -> bool {
        match self {
            SideBehavior::Back => false,
            SideBehavior::Numeric(face) => {
                matches!(face.value, Value::Number(0..=9)) && face.color != Color::Wild
            }
            SideBehavior::Directional(face, _) | SideBehavior::Flip(face) => {
                face.color != Color::Wild
            }
            SideBehavior::Wild(..) => true,
        }
    }

    /// Applies this side's effect to `game`. Effects of a wild run in a fixed
    /// order: forced draw, color request, skips and reversal, player request.
    pub(crate) fn perform_effect(&self, game: &mut Game) -> Result<()> {
        match *self {
            SideBehavior::Numeric(_) => {}
            SideBehavior::Directional(_, action) => match action {
                DirectionalAction::Skip(count) => game.skip_players(count),
                DirectionalAction::SkipEveryone => game.skip_players(game.player_count() - 1),
                DirectionalAction::Reverse => game.reverse_play_order(),
                DirectionalAction::Draw(amount) => {
                    game.make_next_player_draw(amount);
                    game.skip_players(1);
                }
            },
            SideBehavior::Flip(_) => game.flip_the_world(),
            SideBehavior::Wild(_, effect) => {
                if effect.draw_amount > 0 {
                    game.make_next_player_draw(effect.draw_amount);
                }
                if let Some(choice) = effect.color_choice {
                    game.request_color(choice);
                }
                if effect.skip_count > 0 {
                    game.skip_players(effect.skip_count);
                }
                if effect.reverses {
                    game.reverse_play_order();
                }
                if let Some(choice) = effect.player_choice {
                    game.request_player(choice);
                }
            }
            SideBehavior::Back => {
                tracing::error!("the back of a card was asked to perform an effect");
                return Err(UnoError::InactiveSide);
            }
        }
        Ok(())
    }
}

impl Display for SideBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face())
    }
}

/// The match-wide facts a legality check needs besides the two cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayContext {
    pub side: Side,
    pub color_override: Option<Color>,
}

impl PlayContext {
    pub fn new(side: Side, color_override: Option<Color>) -> Self {
        Self {
            side,
            color_override,
        }
    }

    /// The color a card has to match: the declared color, else the top card's.
    pub fn target_color(&self, top: &Card) -> Color {
        self.color_override.unwrap_or_else(|| top.color(self.side))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Sides {
    Single(SideBehavior),
    Double {
        light: SideBehavior,
        dark: SideBehavior,
    },
}

/// An immutable card. Every attribute is read through the side that is
/// currently up, which the caller passes in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card(Sides);

impl Card {
    pub fn new(color: Color, value: Value) -> Result<Self> {
        Self::single(SideBehavior::new(color, value))
    }

    pub fn single(behavior: SideBehavior) -> Result<Self> {
        if !behavior.is_valid_face() {
            return Err(UnoError::InvalidCard);
        }
        Ok(Self(Sides::Single(behavior)))
    }

    pub fn double(light: SideBehavior, dark: SideBehavior) -> Result<Self> {
        if !light.is_valid_face() || !dark.is_valid_face() {
            return Err(UnoError::InvalidCard);
        }
        Ok(Self(Sides::Double { light, dark }))
    }

    pub fn is_double_sided(&self) -> bool {
        matches!(self.0, Sides::Double { .. })
    }

    /// The behavior governing this card while `side` is up. Single-sided
    /// cards ignore the flag.
    pub fn active(&self, side: Side) -> &SideBehavior {
        match &self.0 {
            Sides::Single(behavior) => behavior,
            Sides::Double { light, .. } if side == Side::Light => light,
            Sides::Double { dark, .. } => dark,
        }
    }

    /// The face pointing away from the table, [`SideBehavior::Back`] for
    /// single-sided cards.
    pub fn inactive(&self, side: Side) -> &SideBehavior {
        match &self.0 {
            Sides::Single(_) => &SideBehavior::Back,
            Sides::Double { dark, .. } if side == Side::Light => dark,
            Sides::Double { light, .. } => light,
        }
    }

    pub fn face(&self, side: Side) -> CardFace {
        self.active(side).face()
    }

    pub fn color(&self, side: Side) -> Color {
        self.active(side).color()
    }

    pub fn value(&self, side: Side) -> Value {
        self.active(side).value()
    }

    pub fn is_wild(&self, side: Side) -> bool {
        self.color(side) == Color::Wild
    }

    pub fn points(&self, side: Side) -> u32 {
        self.value(side).points()
    }

    pub fn can_be_played_on(&self, top: &Card, ctx: PlayContext) -> bool {
        let mine = self.active(ctx.side);
        let theirs = top.active(ctx.side);
        if mine.is_back() || theirs.is_back() {
            return false;
        }

        let color = mine.color();
        color == Color::Wild || color == ctx.target_color(top) || mine.value() == theirs.value()
    }

    pub fn describe(&self, side: Side) -> String {
        self.face(side).to_string()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Sides::Single(behavior) => write!(f, "{behavior}"),
            Sides::Double { light, dark } => write!(f, "{light} / {dark}"),
        }
    }
}
