//! Gameplay state and the per-frame pass ordering
//!
//! A frame runs the passes in a fixed order: entity updates, the collision
//! pass, message dispatch, then event dispatch. Anything an entity queued
//! during the frame takes effect before the next frame's update pass, never
//! mid-traversal, and events raised by the message dispatcher are delivered
//! within the same frame.

use std::cell::RefCell;
use std::rc::Rc;

use spark_engine::entity::{EntityId, EntityManager, UpdateContext};
use spark_engine::events::{EventBus, EventHandler};
use spark_engine::foundation::math::{Point2, Rect, Vec2};
use spark_engine::input::{InputState, KeyCode};
use spark_engine::message::MessageManager;
use spark_engine::render::{DrawBackend, RenderFrame, ResourceLoader, TextureHandle};

use crate::buckets::Bucket;
use crate::config::GameConfig;
use crate::entities::{Player, Puff, Scenery, Shot};
use crate::messages::GameMessage;

/// What the active state wants the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTransition {
    /// Keep running
    Continue,
    /// Shut the game down
    Quit,
}

/// A screen of the game (gameplay, menus, ...)
pub trait GameState {
    /// Load assets and populate the world
    fn enter(&mut self, resources: &mut dyn ResourceLoader);

    /// Advance the state by one frame
    fn update(&mut self, elapsed: f32, input: &dyn InputState) -> StateTransition;

    /// Draw the state
    fn render(&mut self, backend: &mut dyn DrawBackend);

    /// Tear down the world and release assets
    fn exit(&mut self, resources: &mut dyn ResourceLoader);
}

/// Gameplay notifications, observed by registered handlers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The player fired a shot
    ShotFired,
    /// A shot hit something solid
    Impact,
}

/// Tallies of what happened during a play session
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionStats {
    /// Shots fired by the player
    pub shots_fired: u32,
    /// Shots that hit something solid
    pub impacts: u32,
}

struct StatsHandler {
    stats: Rc<RefCell<SessionStats>>,
}

impl EventHandler<GameEvent> for StatsHandler {
    fn on_event(&mut self, event: &GameEvent) -> bool {
        let mut stats = self.stats.borrow_mut();
        match event {
            GameEvent::ShotFired => stats.shots_fired += 1,
            GameEvent::Impact => stats.impacts += 1,
        }
        false
    }
}

/// Handles to every texture the play state draws with
#[derive(Debug, Default, Clone, Copy)]
struct GameTextures {
    player: TextureHandle,
    shot: TextureHandle,
    puff: TextureHandle,
    rock: TextureHandle,
    backdrop: TextureHandle,
}

impl GameTextures {
    fn load(resources: &mut dyn ResourceLoader) -> Self {
        Self {
            player: load_or_invalid(resources, "resources/graphics/player.png"),
            shot: load_or_invalid(resources, "resources/graphics/shot.png"),
            puff: load_or_invalid(resources, "resources/graphics/puff.png"),
            rock: load_or_invalid(resources, "resources/graphics/rock.png"),
            backdrop: load_or_invalid(resources, "resources/graphics/backdrop.png"),
        }
    }

    fn unload(&self, resources: &mut dyn ResourceLoader) {
        for texture in [self.player, self.shot, self.puff, self.rock, self.backdrop] {
            if texture.is_valid() {
                resources.unload_texture(texture);
            }
        }
    }
}

/// A missing asset degrades to an invalid handle; those draws are absorbed
/// by the render frame.
fn load_or_invalid(resources: &mut dyn ResourceLoader, path: &str) -> TextureHandle {
    match resources.load_texture(path) {
        Ok(handle) => handle,
        Err(err) => {
            log::error!("failed to load {path}: {err}");
            TextureHandle::INVALID
        }
    }
}

/// State shared between the play state and its message dispatcher
struct GameContext {
    config: GameConfig,
    textures: GameTextures,
    events: EventBus<GameEvent>,
}

fn dispatch(
    ctx: &mut GameContext,
    message: &GameMessage,
    world: &mut EntityManager<GameMessage>,
) {
    match *message {
        GameMessage::SpawnShot {
            position,
            angle,
            kind,
        } => {
            let shot = Shot::new(&ctx.config.shots, kind, position, angle, ctx.textures.shot);
            let id = world.insert(Box::new(shot));
            world.add_to_bucket(id, Bucket::Shots.index());
            world.release(id);
            ctx.events.send(GameEvent::ShotFired);
        }
        GameMessage::SpawnPuff { position } => {
            let puff = Puff::new(position, ctx.textures.puff);
            let id = world.insert(Box::new(puff));
            world.add_to_bucket(id, Bucket::Effects.index());
            world.release(id);
            ctx.events.send(GameEvent::Impact);
        }
        GameMessage::Destroy(id) => {
            if !world.remove(id) {
                log::trace!("destroy target already removed");
            }
        }
    }
}

/// The gameplay screen: owns the world, the message dispatcher, and the
/// scrolling camera
pub struct PlayState {
    shared: Rc<RefCell<GameContext>>,
    world: EntityManager<GameMessage>,
    messages: MessageManager<GameMessage>,
    stats: Rc<RefCell<SessionStats>>,
    player: Option<EntityId>,
    camera: Point2,
}

impl PlayState {
    /// Create the state from a loaded configuration
    pub fn new(config: GameConfig) -> Self {
        let shared = Rc::new(RefCell::new(GameContext {
            config,
            textures: GameTextures::default(),
            events: EventBus::new(),
        }));
        let stats = Rc::new(RefCell::new(SessionStats::default()));
        shared
            .borrow_mut()
            .events
            .register(Box::new(StatsHandler {
                stats: Rc::clone(&stats),
            }));

        let dispatch_ctx = Rc::clone(&shared);
        let messages = MessageManager::new(move |message, world, _requeue| {
            dispatch(&mut dispatch_ctx.borrow_mut(), message, world);
        });

        Self {
            shared,
            world: EntityManager::new(),
            messages,
            stats,
            player: None,
            camera: Point2::new(0.0, 0.0),
        }
    }

    /// Session tallies so far
    pub fn stats(&self) -> SessionStats {
        *self.stats.borrow()
    }

    /// Read access to the world, for tooling and tests
    pub fn world(&self) -> &EntityManager<GameMessage> {
        &self.world
    }

    fn world_bounds(&self) -> Rect {
        let shared = self.shared.borrow();
        Rect::new(
            Point2::new(0.0, 0.0),
            Vec2::new(shared.config.world.width, shared.config.world.height),
        )
    }

    /// Keep the camera on the player, clamped to the playfield
    fn follow_player(&mut self) {
        let Some(id) = self.player else {
            return;
        };
        let Some(entity) = self.world.get(id) else {
            return;
        };
        let center = entity.rect().center();
        let shared = self.shared.borrow();
        let window = &shared.config.window;
        let world = &shared.config.world;
        self.camera = Point2::new(
            (center.x - window.width / 2.0).clamp(0.0, (world.width - window.width).max(0.0)),
            (center.y - window.height / 2.0).clamp(0.0, (world.height - window.height).max(0.0)),
        );
    }

    fn spawn_world(&mut self) {
        let (textures, world_rect, player_start, rocks) = {
            let shared = self.shared.borrow();
            let world = &shared.config.world;
            let rock = Vec2::new(64.0, 64.0);
            (
                shared.textures,
                Rect::new(Point2::new(0.0, 0.0), Vec2::new(world.width, world.height)),
                Point2::new(world.width * 0.15, world.height * 0.5),
                // One rock sits on the default firing line.
                vec![
                    Rect::from_center(Point2::new(world.width * 0.45, world.height * 0.5), rock),
                    Rect::from_center(Point2::new(world.width * 0.65, world.height * 0.25), rock),
                    Rect::from_center(Point2::new(world.width * 0.85, world.height * 0.75), rock),
                ],
            )
        };

        let backdrop = Scenery::backdrop(world_rect, textures.backdrop);
        let id = self.world.insert(Box::new(backdrop));
        self.world.add_to_bucket(id, Bucket::Scenery.index());
        self.world.release(id);

        for area in rocks {
            let block = Scenery::block(area, textures.rock);
            let id = self.world.insert(Box::new(block));
            self.world.add_to_bucket(id, Bucket::Scenery.index());
            self.world.release(id);
        }

        let player = {
            let shared = self.shared.borrow();
            Player::new(&shared.config.player, player_start, textures.player)
        };
        let id = self.world.insert(Box::new(player));
        self.world.add_to_bucket(id, Bucket::Player.index());
        // The state keeps its insert reference so the id stays valid for
        // camera tracking even if the player leaves its bucket.
        self.player = Some(id);
    }
}

impl GameState for PlayState {
    fn enter(&mut self, resources: &mut dyn ResourceLoader) {
        log::info!("entering play state");
        self.shared.borrow_mut().textures = GameTextures::load(resources);
        self.spawn_world();
        self.follow_player();
    }

    fn update(&mut self, elapsed: f32, input: &dyn InputState) -> StateTransition {
        if input.is_key_pressed(KeyCode::Escape) {
            return StateTransition::Quit;
        }

        let bounds = self.world_bounds();
        let mut ctx = UpdateContext {
            elapsed,
            input,
            world_bounds: bounds,
            messages: self.messages.queue_mut(),
        };
        self.world.update_all(&mut ctx);

        self.world.check_collisions(
            Bucket::Shots.index(),
            Bucket::Scenery.index(),
            self.messages.queue_mut(),
        );
        self.messages.update(&mut self.world);
        // Events after messages: notifications sent by the message
        // dispatcher reach their handlers on the frame they were caused.
        self.shared.borrow_mut().events.dispatch();

        self.follow_player();
        StateTransition::Continue
    }

    fn render(&mut self, backend: &mut dyn DrawBackend) {
        let mut frame = RenderFrame::new(backend, self.camera);
        self.world.render_all(&mut frame);
    }

    fn exit(&mut self, resources: &mut dyn ResourceLoader) {
        log::info!("leaving play state: {:?}", self.stats());
        self.world.remove_all();
        if let Some(id) = self.player.take() {
            self.world.release(id);
        }
        self.messages.terminate();
        let shared = self.shared.borrow();
        shared.textures.unload(resources);
    }
}
