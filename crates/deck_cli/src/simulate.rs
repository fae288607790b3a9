//! Headless card stack simulation
//!
//! Mounts a stack of cards, lets the staggered entry play out, drives one
//! scripted pointer gesture on the top card, and runs until everything rests.

use std::str::FromStr;
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use deck_card::{CardConfig, DraggableCard, PointerEvent, RotationSource, Size, SwipeDirection};
use serde::Serialize;
use tracing::{debug, info};

/// Length of a scripted swipe (ms)
const GESTURE_MS: f32 = 160.0;

/// Give up on a stack still moving this long after its last entry delay (ms)
const MAX_RUN_MS: f32 = 30_000.0;

/// Gesture performed on the top card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
    Tap,
    None,
}

impl FromStr for Swipe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Swipe::Left),
            "right" => Ok(Swipe::Right),
            "tap" => Ok(Swipe::Tap),
            "none" => Ok(Swipe::None),
            other => bail!(
                "Invalid swipe '{}'. Valid swipes: {:?}",
                other,
                ["left", "right", "tap", "none"]
            ),
        }
    }
}

/// Parse a `WIDTHxHEIGHT` screen size, e.g. `390x844`
pub fn parse_screen(s: &str) -> Result<Size> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("Screen size '{}' is not WIDTHxHEIGHT", s))?;
    let width: f32 = w
        .trim()
        .parse()
        .with_context(|| format!("Invalid screen width '{}'", w))?;
    let height: f32 = h
        .trim()
        .parse()
        .with_context(|| format!("Invalid screen height '{}'", h))?;
    Ok(Size::new(width, height))
}

/// Everything a simulation run needs
#[derive(Clone, Debug)]
pub struct Scenario {
    pub cards: usize,
    pub screen: Size,
    pub seed: Option<u64>,
    pub swipe: Swipe,
    /// Pointer speed of a swipe (px/s)
    pub speed: f32,
    pub fps: f32,
    pub config: CardConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            cards: 4,
            screen: Size::new(390.0, 844.0),
            seed: None,
            swipe: Swipe::Right,
            speed: 1500.0,
            fps: 60.0,
            config: CardConfig::default(),
        }
    }
}

/// Snapshot of one card
#[derive(Clone, Debug, Serialize)]
pub struct CardState {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale: f32,
    pub phase: &'static str,
}

impl CardState {
    fn of(index: usize, card: &DraggableCard) -> Self {
        Self {
            index,
            x: card.x(),
            y: card.y(),
            rotation: card.rotation(),
            scale: card.scale(),
            phase: card.phase().name(),
        }
    }
}

/// One rendered frame
#[derive(Clone, Debug, Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub time_ms: f32,
    pub cards: Vec<CardState>,
}

/// A card that came to rest after a release
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Settled {
    pub index: usize,
    pub direction: SwipeDirection,
}

/// Outcome of a run
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub frames: u64,
    pub elapsed_ms: f32,
    pub settled: Vec<Settled>,
    pub cards: Vec<CardState>,
}

struct Stack {
    cards: Vec<DraggableCard>,
    dt_ms: f32,
    /// Entry delay of the last card in the stack
    stagger_ms: f32,
    frame: u64,
    elapsed_ms: f32,
}

impl Stack {
    /// Advance every card one frame; `true` while anything still moves
    fn step<F>(&mut self, on_frame: &mut F) -> Result<bool>
    where
        F: FnMut(&FrameRecord) -> Result<()>,
    {
        let mut moving = false;
        for card in &mut self.cards {
            moving |= card.tick(self.dt_ms);
        }
        self.frame += 1;
        self.elapsed_ms += self.dt_ms;

        on_frame(&FrameRecord {
            frame: self.frame,
            time_ms: self.elapsed_ms,
            cards: self.snapshot(),
        })?;

        Ok(moving || self.cards.iter().any(|c| c.phase().is_releasing()))
    }

    fn run_until_rest<F>(&mut self, on_frame: &mut F) -> Result<()>
    where
        F: FnMut(&FrameRecord) -> Result<()>,
    {
        let budget_ms = self.stagger_ms + MAX_RUN_MS;
        let deadline = self.elapsed_ms + budget_ms;
        while self.step(on_frame)? {
            if self.elapsed_ms > deadline {
                bail!("Cards still moving after {} ms", budget_ms);
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<CardState> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| CardState::of(i, card))
            .collect()
    }
}

/// Run a scenario, calling `on_frame` after every frame
pub fn run<F>(scenario: &Scenario, mut on_frame: F) -> Result<Report>
where
    F: FnMut(&FrameRecord) -> Result<()>,
{
    if scenario.cards == 0 {
        bail!("A stack needs at least one card");
    }
    if !(scenario.fps.is_finite() && scenario.fps > 0.0) {
        bail!("Invalid frame rate {}", scenario.fps);
    }
    if !(scenario.speed.is_finite() && scenario.speed >= 0.0) {
        bail!("Invalid swipe speed {}", scenario.speed);
    }

    let (tx, rx) = mpsc::channel();
    let mut cards = Vec::with_capacity(scenario.cards);
    for index in 0..scenario.cards {
        let rotation = match scenario.seed {
            Some(seed) => RotationSource::Seeded(seed.wrapping_add(index as u64)),
            None => RotationSource::Random,
        };
        let tx = tx.clone();
        let card = DraggableCard::builder(format!("cards/{index}.png"), scenario.screen)
            .index(index)
            .config(scenario.config.clone())
            .rotation(rotation)
            .on_settle(move |direction| {
                if let Err(err) = tx.send(Settled { index, direction }) {
                    debug!(index, %err, "settle not recorded");
                }
            })
            .build()
            .with_context(|| format!("Failed to create card {}", index))?;
        cards.push(card);
    }

    let mut stack = Stack {
        cards,
        dt_ms: 1000.0 / scenario.fps,
        stagger_ms: scenario
            .config
            .entry_delay_ms(Some(scenario.cards.saturating_sub(1))),
        frame: 0,
        elapsed_ms: 0.0,
    };

    info!(cards = scenario.cards, "mounting stack");
    for card in &mut stack.cards {
        card.mount();
    }
    stack.run_until_rest(&mut on_frame)?;
    debug!(elapsed_ms = stack.elapsed_ms, "entry finished");

    perform_swipe(&mut stack, scenario, &mut on_frame)?;
    stack.run_until_rest(&mut on_frame)?;

    let settled: Vec<Settled> = rx.try_iter().collect();
    info!(
        frames = stack.frame,
        elapsed_ms = stack.elapsed_ms,
        settled = settled.len(),
        "simulation finished"
    );

    Ok(Report {
        frames: stack.frame,
        elapsed_ms: stack.elapsed_ms,
        settled,
        cards: stack.snapshot(),
    })
}

/// Script pointer input on the top card, one sample per frame
fn perform_swipe<F>(stack: &mut Stack, scenario: &Scenario, on_frame: &mut F) -> Result<()>
where
    F: FnMut(&FrameRecord) -> Result<()>,
{
    let sign = match scenario.swipe {
        Swipe::None => return Ok(()),
        Swipe::Tap => 0.0,
        Swipe::Left => -1.0,
        Swipe::Right => 1.0,
    };

    let cx = scenario.screen.width / 2.0;
    let cy = scenario.screen.height / 2.0;
    let top = stack.cards.len() - 1;
    info!(card = top, swipe = ?scenario.swipe, "performing gesture");

    stack.cards[top].handle_pointer(PointerEvent::down(0, cx, cy, 0.0));

    let mut t = 0.0f32;
    let mut x = cx;
    if scenario.swipe != Swipe::Tap {
        while t < GESTURE_MS {
            t = (t + stack.dt_ms).min(GESTURE_MS);
            x = cx + sign * scenario.speed * t / 1000.0;
            stack.cards[top].handle_pointer(PointerEvent::moved(0, x, cy, t as f64));
            stack.step(on_frame)?;
        }
    }

    stack.cards[top].handle_pointer(PointerEvent::up(0, x, cy, t as f64));
    Ok(())
}
