use log::debug;

use crate::{
    attachment::{Attachment, Rider, Transition},
    collision::{
        AttachContact, Footprint, GeometryProbe, Landing, Point2, ResolveRequest, SurfaceLookup,
        Vec2, is_ground, resolve_free_motion,
    },
    constants::{CAN_JUMP_GRACE_TICKS, CANT_SNAP_TICKS, TICK_INTERVAL},
    input::{InputSource, PayloadGate, sample_run_input},
    motion::{advance_fall, advance_run},
};

/// Integrator state owned by one controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicState {
    /// Resolved position at the end of the last tick (bottom center of the footprint).
    pub position: Point2,
    /// Resolved position at the end of the tick before, for interpolation.
    pub previous_position: Point2,
    /// Units/tick.
    pub velocity: Vec2,
    pub facing_right: bool,
    /// Jump grace countdown: held at 3 while attached, counts down every free tick.
    pub can_jump_counter: i32,
    /// Free ticks left before a ground hit may attach again.
    pub cant_snap_ticks: u32,
    /// Jump ascent counter; reset on attach.
    pub jump_frames: i32,
}

impl KinematicState {
    pub fn at(position: Point2) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: Vec2::zeros(),
            facing_right: true,
            can_jump_counter: 0,
            cant_snap_ticks: 0,
            jump_frames: 0,
        }
    }
}

/// Fixed-step kinematic controller for one character.
///
/// Each [`tick`](Self::tick):
/// 1. samples input once and updates horizontal then vertical velocity,
/// 2. while attached, lets the rider move the character and only checks for loss of footing,
/// 3. while free (or right after losing footing), resolves `position + velocity` against the
///    world, which may attach the character to the ground it landed on.
pub struct CharacterController<R: Rider> {
    footprint: Footprint,
    state: KinematicState,
    attachment: Attachment,
    rider: R,
    tick_seconds: f32,
}

impl<R: Rider> CharacterController<R> {
    /// A controller at `spawn` in the free state, as if it had just left a surface.
    pub fn new(spawn: Point2, footprint: Footprint, rider: R) -> Self {
        debug_assert!(footprint.validate().is_ok(), "{:?}", footprint.validate());
        Self {
            footprint,
            state: KinematicState {
                cant_snap_ticks: CANT_SNAP_TICKS,
                ..KinematicState::at(spawn)
            },
            attachment: Attachment::Free,
            rider,
            tick_seconds: TICK_INTERVAL.as_secs_f32(),
        }
    }

    /// Override the tick length used to convert body velocities (units/second) to units/tick.
    pub fn with_tick_seconds(mut self, tick_seconds: f32) -> Self {
        self.tick_seconds = tick_seconds;
        self
    }

    /// Run one simulation tick. Returns the attachment transition performed, if any.
    pub fn tick<W>(
        &mut self,
        world: &W,
        input: &impl InputSource,
        gate: &impl PayloadGate,
    ) -> Option<Transition>
    where
        W: GeometryProbe + SurfaceLookup,
    {
        self.state.previous_position = self.state.position;

        let attached = self.attachment.is_attached();
        let run = advance_run(
            self.state.velocity.x,
            sample_run_input(input, gate),
            attached,
        );
        self.state.velocity.x = run.vx;
        if let Some(facing_right) = run.facing_right {
            self.state.facing_right = facing_right;
        }
        self.state.velocity.y = advance_fall(self.state.velocity.y);

        if attached {
            self.state.can_jump_counter = CAN_JUMP_GRACE_TICKS;

            let update = self
                .rider
                .update_position(world, self.state.velocity.x, is_ground);
            if update.solid_wall_collision {
                self.state.velocity.x = 0.0;
            }
            self.state.position = self.rider.current_position();

            if update.still_standing {
                return None;
            }
            self.detach();
            self.free_movement(world);
            return Some(Transition::Detached);
        }

        self.state.can_jump_counter = self.state.can_jump_counter.saturating_sub(1);
        let attached_now = self.free_movement(world);
        self.state.cant_snap_ticks = self.state.cant_snap_ticks.saturating_sub(1);
        attached_now.then_some(Transition::Attached)
    }

    fn free_movement<W>(&mut self, world: &W) -> bool
    where
        W: GeometryProbe + SurfaceLookup,
    {
        let out = resolve_free_motion(
            world,
            ResolveRequest {
                position: self.state.position + self.state.velocity,
                velocity: self.state.velocity,
                footprint: self.footprint,
                can_attach: self.state.cant_snap_ticks == 0,
                tick_seconds: self.tick_seconds,
            },
        );
        self.state.position = out.position;
        self.state.velocity = out.velocity;

        match out.landing {
            Some(landing) => {
                self.attach(world, landing);
                true
            }
            None => false,
        }
    }

    fn attach<W: SurfaceLookup>(&mut self, world: &W, landing: Landing) {
        let contact = AttachContact {
            collider: landing.collider,
            body: landing.body,
            point: self.state.position,
            normal: landing.normal,
            velocity: self.state.velocity,
        };
        self.state.jump_frames = 0;
        self.rider.attach(world, contact);
        self.attachment = Attachment::Attached(contact);
        debug!(
            "attached to {:?} at {:?}, normal {:?}",
            contact.collider, contact.point, contact.normal
        );
    }

    fn detach(&mut self) {
        let at = self.rider.current_position();
        let from = self.attachment.contact().map(|c| c.collider);
        self.rider.detach();
        self.attachment = Attachment::Free;

        self.state.velocity.y = 0.0;
        self.state.cant_snap_ticks = CANT_SNAP_TICKS;
        self.state.position = at;
        self.state.previous_position = at;
        debug!("lost footing on {from:?} at {at:?}");
    }

    /// Current position; the rider's while attached.
    pub fn position(&self) -> Point2 {
        if self.attachment.is_attached() {
            self.rider.current_position()
        } else {
            self.state.position
        }
    }

    pub fn previous_position(&self) -> Point2 {
        self.state.previous_position
    }

    /// `(previous, current)` resolved positions of the last tick, for render interpolation.
    ///
    /// Both are equal right after a detach snapped them.
    pub fn resolved_poses(&self) -> (Point2, Point2) {
        (self.state.previous_position, self.position())
    }

    /// Current velocity (units/tick); the rider's estimate while attached.
    pub fn velocity(&self) -> Vec2 {
        if self.attachment.is_attached() {
            self.rider.estimated_velocity()
        } else {
            self.state.velocity
        }
    }

    pub fn facing_right(&self) -> bool {
        self.state.facing_right
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_attached()
    }

    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    pub fn can_jump_counter(&self) -> i32 {
        self.state.can_jump_counter
    }

    pub fn cant_snap_ticks(&self) -> u32 {
        self.state.cant_snap_ticks
    }

    pub fn jump_frames(&self) -> i32 {
        self.state.jump_frames
    }

    /// Raw integrator state.
    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn rider(&self) -> &R {
        &self.rider
    }

    #[cfg(test)]
    pub fn rider_mut(&mut self) -> &mut R {
        &mut self.rider
    }
}
