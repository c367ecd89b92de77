//! Shared test helpers: recording fakes for every host collaborator.
//!
//! Every side effect a bot performs lands in a [`Journal`] as
//! `(bot guid, action)` so tests can assert on exactly what was mirrored.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use botswarm_config::SwarmConfig;
use botswarm_core::{
    BotController, BotPlayer, BotSettings, ControllerFactory, FlightPath, GameObjectInfo,
    GossipMenuItem, GroupId, GroupService, Host, MasterView, MovementOrder, NpcInfo, ObjectGuid,
    Position, QuestStatus, QuestTemplate, RemoveMethod, RollVote, SessionProvider, SwarmError,
    TaxiNode, TaxiPathNode, Team, WorldObjectInfo, WorldPacket, WorldQuery,
};

use crate::registry::AgentHandle;
use crate::roll::SeededRolls;
use crate::swarm::BotSwarm;

pub const MASTER: u64 = 1000;

pub fn guid(raw: u64) -> ObjectGuid {
    ObjectGuid::new(raw)
}

// --- Journal ---

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub bot: ObjectGuid,
    pub action: String,
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Call>>>);

impl Journal {
    pub fn record(&self, bot: ObjectGuid, action: impl Into<String>) {
        self.0.lock().unwrap().push(Call {
            bot,
            action: action.into(),
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn actions_of(&self, bot: u64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.bot == guid(bot))
            .map(|c| c.action)
            .collect()
    }

    /// Number of recorded actions starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.action.starts_with(prefix))
            .count()
    }

    /// Bots that performed an action starting with `prefix`, sorted.
    pub fn bots_with(&self, prefix: &str) -> Vec<u64> {
        let mut bots: Vec<u64> = self
            .calls()
            .iter()
            .filter(|c| c.action.starts_with(prefix))
            .map(|c| c.bot.raw())
            .collect();
        bots.sort_unstable();
        bots
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

// --- Bot character state ---

#[derive(Debug, Clone)]
pub struct BotState {
    pub in_world: bool,
    pub map_id: u32,
    pub instance_id: u32,
    pub orientation: f32,
    pub team: Team,
    pub friendly_to: HashSet<ObjectGuid>,
    pub in_los: HashSet<ObjectGuid>,
    pub npcs: HashMap<ObjectGuid, NpcInfo>,
    /// Queued taxi nodes; front is the current source, back the destination.
    pub taxi_route: Vec<u32>,
    pub taxi_cheater: bool,
    pub taximask: HashSet<u32>,
    /// Spline waypoints when airborne.
    pub flight: Option<Vec<TaxiPathNode>>,
    pub quest_status: HashMap<u32, QuestStatus>,
    pub can_take_quest: bool,
    pub holds_quest: bool,
    pub quest_log_full: bool,
    pub bags_full: bool,
    pub quest_menu: Vec<u32>,
    pub can_store: bool,
}

impl Default for BotState {
    fn default() -> Self {
        Self {
            in_world: true,
            map_id: 0,
            instance_id: 0,
            orientation: 0.0,
            team: Team::Alliance,
            friendly_to: HashSet::new(),
            in_los: HashSet::new(),
            npcs: HashMap::new(),
            taxi_route: Vec::new(),
            taxi_cheater: false,
            taximask: HashSet::new(),
            flight: None,
            quest_status: HashMap::new(),
            can_take_quest: true,
            holds_quest: false,
            quest_log_full: false,
            bags_full: false,
            quest_menu: Vec::new(),
            can_store: true,
        }
    }
}

pub type SharedState = Arc<Mutex<BotState>>;

// --- Fake player ---

pub struct FakeFlight {
    bot: ObjectGuid,
    nodes: Vec<TaxiPathNode>,
    cursor: usize,
    journal: Journal,
}

impl FlightPath for FakeFlight {
    fn interrupt(&mut self) {
        self.journal.record(self.bot, "flight_interrupt");
    }

    fn set_current_node_after_teleport(&mut self) {
        let Some(start) = self.nodes.get(self.cursor) else {
            return;
        };
        let map = start.map_id;
        if let Some(i) = self.nodes.iter().skip(self.cursor).position(|n| n.map_id != map) {
            self.cursor += i;
        }
    }

    fn current_node(&self) -> Option<TaxiPathNode> {
        self.nodes.get(self.cursor).copied()
    }

    fn skip_current_node(&mut self) {
        self.cursor += 1;
        self.journal.record(self.bot, format!("flight_cursor {}", self.cursor));
    }
}

pub struct FakeBot {
    guid: ObjectGuid,
    name: String,
    state: SharedState,
    flight: Option<FakeFlight>,
    journal: Journal,
}

impl FakeBot {
    pub fn new(guid: ObjectGuid, name: &str, state: SharedState, journal: Journal) -> Self {
        let flight = state.lock().unwrap().flight.clone().map(|nodes| FakeFlight {
            bot: guid,
            nodes,
            cursor: 0,
            journal: journal.clone(),
        });
        Self {
            guid,
            name: name.to_string(),
            state,
            flight,
            journal,
        }
    }

    fn st(&self) -> std::sync::MutexGuard<'_, BotState> {
        self.state.lock().unwrap()
    }

    fn record(&self, action: impl Into<String>) {
        self.journal.record(self.guid, action);
    }
}

impl BotPlayer for FakeBot {
    fn guid(&self) -> ObjectGuid {
        self.guid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_in_world(&self) -> bool {
        self.st().in_world
    }

    fn map_id(&self) -> u32 {
        self.st().map_id
    }

    fn orientation(&self) -> f32 {
        self.st().orientation
    }

    fn team(&self) -> Team {
        self.st().team
    }

    fn is_friendly_to(&self, unit: ObjectGuid) -> bool {
        self.st().friendly_to.contains(&unit)
    }

    fn is_within_los(&self, unit: ObjectGuid) -> bool {
        self.st().in_los.contains(&unit)
    }

    fn is_in_map(&self, object: &WorldObjectInfo) -> bool {
        let st = self.st();
        st.map_id == object.map_id && st.instance_id == object.instance_id
    }

    fn npc_if_can_interact(&self, npc: ObjectGuid) -> Option<NpcInfo> {
        self.st().npcs.get(&npc).copied()
    }

    fn clear_motion(&mut self) {
        self.record("clear_motion");
    }

    fn move_follow(&mut self, target: ObjectGuid, distance: f32, _angle: f32) {
        self.record(format!("follow {} {}", target.raw(), distance));
    }

    fn active_flight(&mut self) -> Option<&mut dyn FlightPath> {
        self.flight.as_mut().map(|f| f as &mut dyn FlightPath)
    }

    fn teleport_to(&mut self, map_id: u32, position: Position, _orientation: f32) {
        self.st().map_id = map_id;
        self.record(format!(
            "teleport {} {} {} {}",
            map_id, position.x, position.y, position.z
        ));
    }

    fn taxi_destination(&self) -> Option<u32> {
        self.st().taxi_route.last().copied()
    }

    fn taxi_source(&self) -> u32 {
        self.st().taxi_route.first().copied().unwrap_or(0)
    }

    fn next_taxi_destination(&mut self) -> Option<u32> {
        let mut st = self.st();
        if !st.taxi_route.is_empty() {
            st.taxi_route.remove(0);
        }
        if st.taxi_route.len() < 2 {
            None
        } else {
            Some(st.taxi_route[1])
        }
    }

    fn clear_taxi_destinations(&mut self) {
        self.st().taxi_route.clear();
        self.record("clear_taxi");
    }

    fn is_taxi_cheater(&self) -> bool {
        self.st().taxi_cheater
    }

    fn set_taximask_node(&mut self, node: u32) -> bool {
        self.st().taximask.insert(node)
    }

    fn quest_status(&self, quest: u32) -> QuestStatus {
        self.st()
            .quest_status
            .get(&quest)
            .copied()
            .unwrap_or(QuestStatus::None)
    }

    fn can_take_quest(&self, _quest: &QuestTemplate) -> bool {
        let st = self.st();
        st.can_take_quest && !st.holds_quest
    }

    fn satisfies_quest_status(&self, _quest: &QuestTemplate) -> bool {
        !self.st().holds_quest
    }

    fn satisfies_quest_log(&self) -> bool {
        !self.st().quest_log_full
    }

    fn can_add_quest(&self, _quest: &QuestTemplate) -> bool {
        !self.st().bags_full
    }

    fn quest_menu(&mut self, _giver: ObjectGuid) -> Vec<u32> {
        self.st().quest_menu.clone()
    }

    fn update_roll_criteria(&mut self, vote: RollVote) {
        self.record(format!("roll_criteria {:?}", vote));
    }

    fn send_new_taxi_path(&mut self) {
        self.record("new_taxi_path");
    }

    fn send_do_flight(&mut self, mount_display_id: u32, path_id: u32, start_node: u32) {
        self.record(format!(
            "do_flight mount={} path={} start={}",
            mount_display_id, path_id, start_node
        ));
    }

    fn send_learn_new_taxi_node(&mut self, npc: &NpcInfo) {
        self.record(format!("learn_taxi_node {}", npc.guid.raw()));
    }

    fn handle_quest_accept(&mut self, packet: &mut WorldPacket) {
        let npc = packet.read_guid().map(|g| g.raw()).unwrap_or_default();
        let quest = packet.read_u32().unwrap_or_default();
        self.record(format!("session_accept_quest npc={} quest={}", npc, quest));
    }

    fn handle_area_trigger(&mut self, packet: &mut WorldPacket) {
        let trigger = packet.read_u32().unwrap_or_default();
        self.record(format!("session_area_trigger {}", trigger));
    }
}

// --- Fake controller ---

pub struct FakeController {
    guid: ObjectGuid,
    state: SharedState,
    journal: Journal,
}

impl FakeController {
    fn record(&self, action: impl Into<String>) {
        self.journal.record(self.guid, action);
    }
}

impl BotController for FakeController {
    fn set_ignore_update_time(&mut self, seconds: u32) {
        self.record(format!("ignore_updates {}", seconds));
    }

    fn queue_taxi(&mut self, flight_master: ObjectGuid, nodes: &[u32]) {
        self.record(format!("queue_taxi {} {:?}", flight_master.raw(), nodes));
    }

    fn send_not_equip_list(&mut self) {
        self.record("not_equip_list");
    }

    fn feast(&mut self) {
        self.record("feast");
    }

    fn attack(&mut self, target: ObjectGuid) {
        self.record(format!("attack {}", target.raw()));
    }

    fn set_movement_order(&mut self, order: MovementOrder) {
        let text = match order {
            MovementOrder::Stay => "order stay".to_string(),
            MovementOrder::Follow(who) => format!("order follow {}", who.raw()),
        };
        self.record(text);
    }

    fn turn_in_quests(&mut self, giver: ObjectGuid) {
        self.record(format!("turn_in {}", giver.raw()));
    }

    fn add_quest(&mut self, quest: u32, _giver: ObjectGuid) -> bool {
        self.record(format!("add_quest {}", quest));
        true
    }

    fn can_store(&self) -> bool {
        self.state.lock().unwrap().can_store
    }

    fn sell_garbage(&mut self) {
        self.record("sell_garbage");
    }

    fn tell_master(&mut self, text: &str) {
        self.record(format!("tell {}", text));
    }

    fn set_quest_need_items(&mut self) {
        self.record("need_items");
    }

    fn set_quest_need_creatures(&mut self) {
        self.record("need_creatures");
    }

    fn on_detach(&mut self) {
        self.record("detach");
    }
}

/// Build a handle directly, bypassing login.
pub fn fake_handle(raw: u64, state: BotState) -> AgentHandle {
    let journal = Journal::default();
    let state = Arc::new(Mutex::new(state));
    let player = FakeBot::new(guid(raw), &format!("bot{raw}"), state.clone(), journal.clone());
    let controller = FakeController {
        guid: guid(raw),
        state,
        journal,
    };
    AgentHandle::new(Box::new(player), Box::new(controller))
}

// --- Fake host collaborators ---

pub struct FakeSessions {
    characters: Mutex<HashMap<ObjectGuid, (String, SharedState)>>,
    /// Requested guid -> guid the login actually produces.
    aliases: Mutex<HashMap<ObjectGuid, ObjectGuid>>,
    online: Mutex<HashSet<ObjectGuid>>,
    journal: Journal,
}

impl FakeSessions {
    fn state_of(&self, guid: ObjectGuid) -> Option<SharedState> {
        self.characters
            .lock()
            .unwrap()
            .get(&guid)
            .map(|(_, s)| s.clone())
    }
}

impl SessionProvider for FakeSessions {
    fn login(&self, requested: ObjectGuid) -> Result<Box<dyn BotPlayer>, SwarmError> {
        let guid = self
            .aliases
            .lock()
            .unwrap()
            .get(&requested)
            .copied()
            .unwrap_or(requested);
        let (name, state) = self
            .characters
            .lock()
            .unwrap()
            .get(&guid)
            .cloned()
            .ok_or_else(|| SwarmError::Session(format!("no character {guid}")))?;
        self.online.lock().unwrap().insert(guid);
        self.journal.record(guid, "login");
        Ok(Box::new(FakeBot::new(guid, &name, state, self.journal.clone())))
    }

    fn logout(&self, player: Box<dyn BotPlayer>) {
        self.online.lock().unwrap().remove(&player.guid());
        self.journal.record(player.guid(), "logout");
    }

    fn name_of(&self, guid: ObjectGuid) -> Option<String> {
        self.characters
            .lock()
            .unwrap()
            .get(&guid)
            .map(|(n, _)| n.clone())
    }

    fn guid_by_name(&self, name: &str) -> Option<ObjectGuid> {
        self.characters
            .lock()
            .unwrap()
            .iter()
            .find(|(_, (n, _))| n == name)
            .map(|(g, _)| *g)
    }

    fn is_online(&self, guid: ObjectGuid) -> bool {
        self.online.lock().unwrap().contains(&guid)
    }
}

pub struct FakeControllers {
    sessions: Arc<FakeSessions>,
    journal: Journal,
    pub attached: Mutex<Vec<(ObjectGuid, ObjectGuid, BotSettings)>>,
}

impl ControllerFactory for FakeControllers {
    fn attach(
        &self,
        bot: &dyn BotPlayer,
        master: ObjectGuid,
        settings: &BotSettings,
    ) -> Box<dyn BotController> {
        let guid = bot.guid();
        self.attached
            .lock()
            .unwrap()
            .push((guid, master, settings.clone()));
        self.journal.record(guid, "attach");
        let state = self.sessions.state_of(guid).unwrap_or_default();
        Box::new(FakeController {
            guid,
            state,
            journal: self.journal.clone(),
        })
    }
}

#[derive(Debug, Default)]
pub struct WorldData {
    pub quests: HashMap<u32, QuestTemplate>,
    pub game_objects: HashMap<ObjectGuid, GameObjectInfo>,
    pub world_objects: HashMap<ObjectGuid, WorldObjectInfo>,
    pub units: HashSet<ObjectGuid>,
    pub taxi_nodes: HashMap<u32, TaxiNode>,
    pub mounts: HashMap<u32, u32>,
    pub paths: HashMap<(u32, u32), (u32, u32)>,
    pub gossip: HashMap<u32, Vec<GossipMenuItem>>,
}

#[derive(Debug, Default)]
pub struct FakeWorld {
    pub data: Mutex<WorldData>,
}

impl FakeWorld {
    pub fn edit(&self) -> std::sync::MutexGuard<'_, WorldData> {
        self.data.lock().unwrap()
    }
}

impl WorldQuery for FakeWorld {
    fn quest_template(&self, quest: u32) -> Option<QuestTemplate> {
        self.edit().quests.get(&quest).cloned()
    }

    fn game_object(&self, guid: ObjectGuid) -> Option<GameObjectInfo> {
        self.edit().game_objects.get(&guid).copied()
    }

    fn world_object(&self, guid: ObjectGuid) -> Option<WorldObjectInfo> {
        self.edit().world_objects.get(&guid).copied()
    }

    fn unit_exists(&self, guid: ObjectGuid) -> bool {
        self.edit().units.contains(&guid)
    }

    fn taxi_node(&self, node: u32) -> Option<TaxiNode> {
        self.edit().taxi_nodes.get(&node).copied()
    }

    fn taxi_mount_display(&self, node: u32, _team: Team) -> Option<u32> {
        self.edit().mounts.get(&node).copied()
    }

    fn taxi_path(&self, from: u32, to: u32) -> Option<(u32, u32)> {
        self.edit().paths.get(&(from, to)).copied()
    }

    fn gossip_menu_items(&self, menu_id: u32) -> Vec<GossipMenuItem> {
        self.edit().gossip.get(&menu_id).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct FakeGroup {
    pub leader: ObjectGuid,
    pub members: Vec<ObjectGuid>,
}

#[derive(Debug, Default)]
pub struct FakeGroups {
    pub groups: Mutex<HashMap<GroupId, FakeGroup>>,
    pub votes: Mutex<Vec<(ObjectGuid, ObjectGuid, u32, RollVote)>>,
    pub removals: Mutex<Vec<(ObjectGuid, RemoveMethod)>>,
}

impl FakeGroups {
    pub fn create(&self, id: u32, leader: u64, members: &[u64]) {
        let mut all: Vec<ObjectGuid> = vec![guid(leader)];
        all.extend(members.iter().map(|m| guid(*m)).filter(|m| *m != guid(leader)));
        self.groups.lock().unwrap().insert(
            GroupId(id),
            FakeGroup {
                leader: guid(leader),
                members: all,
            },
        );
    }

    pub fn leader(&self, id: u32) -> Option<ObjectGuid> {
        self.groups.lock().unwrap().get(&GroupId(id)).map(|g| g.leader)
    }

    pub fn members(&self, id: u32) -> Vec<u64> {
        let mut members: Vec<u64> = self
            .groups
            .lock()
            .unwrap()
            .get(&GroupId(id))
            .map(|g| g.members.iter().map(|m| m.raw()).collect())
            .unwrap_or_default();
        members.sort_unstable();
        members
    }

    pub fn votes(&self) -> Vec<(ObjectGuid, ObjectGuid, u32, RollVote)> {
        self.votes.lock().unwrap().clone()
    }
}

impl GroupService for FakeGroups {
    fn group_of(&self, member: ObjectGuid) -> Option<GroupId> {
        self.groups
            .lock()
            .unwrap()
            .iter()
            .find(|(_, g)| g.members.contains(&member))
            .map(|(id, _)| *id)
    }

    fn is_member(&self, group: GroupId, member: ObjectGuid) -> bool {
        self.groups
            .lock()
            .unwrap()
            .get(&group)
            .is_some_and(|g| g.members.contains(&member))
    }

    fn is_leader(&self, group: GroupId, member: ObjectGuid) -> bool {
        self.groups
            .lock()
            .unwrap()
            .get(&group)
            .is_some_and(|g| g.leader == member)
    }

    fn remove_member(&self, group: GroupId, member: ObjectGuid, method: RemoveMethod) {
        if let Some(g) = self.groups.lock().unwrap().get_mut(&group) {
            g.members.retain(|m| *m != member);
        }
        self.removals.lock().unwrap().push((member, method));
    }

    fn change_leader(&self, group: GroupId, new_leader: ObjectGuid) {
        if let Some(g) = self.groups.lock().unwrap().get_mut(&group) {
            g.leader = new_leader;
        }
    }

    fn count_roll_vote(
        &self,
        _group: GroupId,
        voter: ObjectGuid,
        item: ObjectGuid,
        number_of_players: u32,
        vote: RollVote,
    ) {
        self.votes
            .lock()
            .unwrap()
            .push((voter, item, number_of_players, vote));
    }
}

pub struct FakeMaster {
    guid: ObjectGuid,
    selection: Mutex<ObjectGuid>,
}

impl FakeMaster {
    pub fn select(&self, target: u64) {
        *self.selection.lock().unwrap() = guid(target);
    }
}

impl MasterView for FakeMaster {
    fn guid(&self) -> ObjectGuid {
        self.guid
    }

    fn name(&self) -> String {
        "Master".into()
    }

    fn selection(&self) -> ObjectGuid {
        *self.selection.lock().unwrap()
    }
}

// --- Fixture ---

/// A complete fake host plus the config a swarm is built from.
pub struct Fixture {
    pub journal: Journal,
    pub sessions: Arc<FakeSessions>,
    pub controllers: Arc<FakeControllers>,
    pub world: Arc<FakeWorld>,
    pub groups: Arc<FakeGroups>,
    pub master: Arc<FakeMaster>,
    pub config: SwarmConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let journal = Journal::default();
        let sessions = Arc::new(FakeSessions {
            characters: Mutex::new(HashMap::new()),
            aliases: Mutex::new(HashMap::new()),
            online: Mutex::new(HashSet::new()),
            journal: journal.clone(),
        });
        let controllers = Arc::new(FakeControllers {
            sessions: sessions.clone(),
            journal: journal.clone(),
            attached: Mutex::new(Vec::new()),
        });
        Self {
            journal,
            sessions,
            controllers,
            world: Arc::new(FakeWorld::default()),
            groups: Arc::new(FakeGroups::default()),
            master: Arc::new(FakeMaster {
                guid: guid(MASTER),
                selection: Mutex::new(ObjectGuid::EMPTY),
            }),
            config: SwarmConfig::default(),
        }
    }

    pub fn host(&self) -> Host {
        Host {
            sessions: self.sessions.clone(),
            controllers: self.controllers.clone(),
            world: self.world.clone(),
            groups: self.groups.clone(),
            master: self.master.clone(),
        }
    }

    /// Register a persisted character the fake session layer can log in.
    pub fn character(&self, raw: u64, state: BotState) -> SharedState {
        let state = Arc::new(Mutex::new(state));
        self.sessions
            .characters
            .lock()
            .unwrap()
            .insert(guid(raw), (format!("bot{raw}"), state.clone()));
        state
    }

    /// Make a login of `requested` come back as character `actual`.
    pub fn alias(&self, requested: u64, actual: u64) {
        self.sessions
            .aliases
            .lock()
            .unwrap()
            .insert(guid(requested), guid(actual));
    }

    /// An empty swarm with deterministic rolls.
    pub fn swarm(&self) -> BotSwarm {
        BotSwarm::with_roll_source(self.host(), &self.config, Box::new(SeededRolls::new(7)))
    }

    /// A swarm with default characters `raws` already logged in.
    /// The journal is cleared afterwards so tests only see their own effects.
    pub fn swarm_with_bots(&self, raws: &[u64]) -> BotSwarm {
        let mut swarm = self.swarm();
        for raw in raws {
            if !self.sessions.characters.lock().unwrap().contains_key(&guid(*raw)) {
                self.character(*raw, BotState::default());
            }
            swarm.add_bot(guid(*raw)).unwrap();
        }
        self.journal.clear();
        swarm
    }

    /// Put the master and `bots` in group 1 with the master leading.
    pub fn group_with_master(&self, bots: &[u64]) {
        self.groups.create(1, MASTER, bots);
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
