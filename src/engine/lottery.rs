use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{
    ActivityInfo, Participant, ParticipantId, PresetWinner, Prize, PrizeId, TimestampMs, Winner, WinnerId,
    NEW_PRIZE_CATEGORY, NEW_PRIZE_NAME,
};
use crate::engine::eligibility::{eligible_participants, won_count};
use crate::engine::errors::LotteryError;
use crate::engine::events::{DrawEventKind, DrawLog};
use crate::engine::ordering::{draw_order, repair_cursor, step_cursor, CursorDirection};
use crate::engine::selection::select_winner;
use crate::engine::validation::{validate_participant, validate_preset, validate_prize};
use crate::engine::{Clock, RandomSource};
use crate::infra::clock::SystemClock;
use crate::infra::ids::IdGenerator;
use crate::infra::import::{ParticipantRow, PrizeRow};
use crate::state::LotterySnapshot;

/// Открытый серийный розыгрыш ("разыграть все оставшиеся").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkDraw {
    pub prize_id: PrizeId,
    /// Сколько мест оставалось в момент старта.
    pub requested: u32,
    /// Уже выбранные победители, в порядке розыгрыша.
    pub winners: Vec<Winner>,
}

/// Итог серийного розыгрыша.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkDrawOutcome {
    pub prize_id: PrizeId,
    pub requested: u32,
    pub winners: Vec<Winner>,
}

impl BulkDrawOutcome {
    /// Все запрошенные места разыграны (пул не кончился раньше).
    pub fn is_complete(&self) -> bool {
        self.winners.len() as u32 == self.requested
    }
}

/// Движок лотереи: единственный владелец коллекций и единственная точка их изменения.
///
/// Слой представления получает только ссылки/копии для чтения и
/// проводит любые изменения через команды ниже.
#[derive(Debug)]
pub struct LotteryEngine {
    participants: Vec<Participant>,
    prizes: Vec<Prize>,
    winners: Vec<Winner>,
    presets: Vec<PresetWinner>,
    activity: ActivityInfo,
    /// Курсор: приз, который сейчас разыгрывается.
    cursor: Option<PrizeId>,
    /// Серийный розыгрыш в процессе. Пока он открыт, остальные команды запрещены.
    bulk: Option<BulkDraw>,
    log: DrawLog,
    ids: IdGenerator,
    clock: Box<dyn Clock>,
    last_timestamp: TimestampMs,
}

impl Default for LotteryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LotteryEngine {
    /// Пустой движок с системными часами.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            participants: Vec::new(),
            prizes: Vec::new(),
            winners: Vec::new(),
            presets: Vec::new(),
            activity: ActivityInfo::default(),
            cursor: None,
            bulk: None,
            log: DrawLog::new(),
            ids: IdGenerator::new(),
            clock,
            last_timestamp: 0,
        }
    }

    /// Восстановить движок из сохранённого снапшота.
    pub fn from_snapshot(snapshot: LotterySnapshot) -> Self {
        Self::from_snapshot_with_clock(snapshot, Box::new(SystemClock))
    }

    /// Восстановить движок из снапшота с заданными часами.
    ///
    /// `remaining` пересчитывается по записям победителей: в старых
    /// сохранениях поле может отсутствовать или разойтись с ними.
    pub fn from_snapshot_with_clock(snapshot: LotterySnapshot, clock: Box<dyn Clock>) -> Self {
        let activity = snapshot.activity_info();
        let LotterySnapshot {
            participants,
            mut prizes,
            winners,
            presets,
            ..
        } = snapshot;

        for prize in prizes.iter_mut() {
            let expected = prize.count.saturating_sub(won_count(&winners, &prize.id));
            if prize.remaining != expected {
                warn!(
                    prize_id = %prize.id,
                    stored = prize.remaining,
                    expected,
                    "remaining не сходится с победителями, пересчитываем"
                );
                prize.remaining = expected;
            }
        }

        let last_timestamp = winners.iter().map(|w| w.timestamp).max().unwrap_or(0);
        let cursor = repair_cursor(&prizes, None);

        info!(
            participants = participants.len(),
            prizes = prizes.len(),
            winners = winners.len(),
            "состояние лотереи загружено"
        );

        Self {
            participants,
            prizes,
            winners,
            presets,
            activity,
            cursor,
            bulk: None,
            log: DrawLog::new(),
            ids: IdGenerator::new(),
            clock,
            last_timestamp,
        }
    }

    /// Полный снапшот для адаптера хранения.
    pub fn snapshot(&self) -> LotterySnapshot {
        LotterySnapshot {
            participants: self.participants.clone(),
            prizes: self.prizes.clone(),
            winners: self.winners.clone(),
            presets: self.presets.clone(),
            activity_name: self.activity.activity_name.clone(),
            company_name: self.activity.company_name.clone(),
        }
    }

    // ---------------------------------------------------------------------
    // Чтение
    // ---------------------------------------------------------------------

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }

    pub fn presets(&self) -> &[PresetWinner] {
        &self.presets
    }

    pub fn activity(&self) -> &ActivityInfo {
        &self.activity
    }

    pub fn events(&self) -> &DrawLog {
        &self.log
    }

    pub fn prize(&self, prize_id: &PrizeId) -> Option<&Prize> {
        self.prizes.iter().find(|p| &p.id == prize_id)
    }

    pub fn preset_for(&self, prize_id: &PrizeId) -> Option<&PresetWinner> {
        self.presets.iter().find(|p| &p.prize_id == prize_id)
    }

    pub fn current_prize_id(&self) -> Option<&PrizeId> {
        self.cursor.as_ref()
    }

    pub fn current_prize(&self) -> Option<&Prize> {
        self.cursor.as_ref().and_then(|id| self.prize(id))
    }

    /// Призы в порядке розыгрыша (мелкие – первыми).
    pub fn prizes_in_draw_order(&self) -> Vec<&Prize> {
        draw_order(&self.prizes)
    }

    /// Участники, ещё ничего не выигравшие.
    pub fn eligible(&self) -> Vec<&Participant> {
        eligible_participants(&self.participants, &self.winners)
    }

    /// Идёт ли серийный розыгрыш.
    pub fn is_drawing(&self) -> bool {
        self.bulk.is_some()
    }

    pub fn bulk_draw(&self) -> Option<&BulkDraw> {
        self.bulk.as_ref()
    }

    // ---------------------------------------------------------------------
    // Розыгрыш
    // ---------------------------------------------------------------------

    /// Разыграть одно место приза.
    pub fn draw_one<R: RandomSource>(&mut self, prize_id: &PrizeId, rng: &mut R) -> Result<Winner, LotteryError> {
        self.ensure_idle()?;
        self.draw_step(prize_id, rng)
    }

    /// Разыграть одно место приза под курсором.
    pub fn draw_current<R: RandomSource>(&mut self, rng: &mut R) -> Result<Winner, LotteryError> {
        let prize_id = self.cursor.clone().ok_or(LotteryError::NoPrizeSelected)?;
        self.draw_one(&prize_id, rng)
    }

    /// Начать серийный розыгрыш всех оставшихся мест.
    ///
    /// Предусловия те же, что у `draw_one`. Возвращает число запрошенных мест.
    pub fn begin_bulk_draw(&mut self, prize_id: &PrizeId) -> Result<u32, LotteryError> {
        self.ensure_idle()?;

        let prize = self.prize(prize_id).ok_or(LotteryError::NoPrizeSelected)?;
        if prize.is_exhausted() {
            return Err(LotteryError::PrizeExhausted(prize_id.clone()));
        }
        if self.eligible().is_empty() {
            return Err(LotteryError::NoEligibleParticipants);
        }

        let requested = prize.remaining;
        self.bulk = Some(BulkDraw {
            prize_id: prize_id.clone(),
            requested,
            winners: Vec::new(),
        });
        self.log.push(DrawEventKind::BulkDrawStarted {
            prize_id: prize_id.clone(),
            requested,
        });
        info!(prize_id = %prize_id, requested, "серийный розыгрыш начат");

        Ok(requested)
    }

    /// Один шаг серийного розыгрыша.
    ///
    /// `Ok(None)` – шагов больше нет: все места разыграны либо пул исчерпан.
    pub fn bulk_draw_step<R: RandomSource>(&mut self, rng: &mut R) -> Result<Option<Winner>, LotteryError> {
        let (prize_id, done) = {
            let bulk = self.bulk.as_ref().ok_or(LotteryError::NoDrawInProgress)?;
            (bulk.prize_id.clone(), bulk.winners.len() as u32 >= bulk.requested)
        };
        if done {
            return Ok(None);
        }

        match self.draw_step(&prize_id, rng) {
            Ok(winner) => {
                if let Some(bulk) = self.bulk.as_mut() {
                    bulk.winners.push(winner.clone());
                }
                Ok(Some(winner))
            }
            Err(LotteryError::NoEligibleParticipants) | Err(LotteryError::PrizeExhausted(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Закрыть серийный розыгрыш и вернуть его итог.
    pub fn finish_bulk_draw(&mut self) -> Result<BulkDrawOutcome, LotteryError> {
        let bulk = self.bulk.take().ok_or(LotteryError::NoDrawInProgress)?;
        let drawn = bulk.winners.len() as u32;

        self.log.push(DrawEventKind::BulkDrawFinished {
            prize_id: bulk.prize_id.clone(),
            requested: bulk.requested,
            drawn,
        });

        if drawn < bulk.requested {
            warn!(
                prize_id = %bulk.prize_id,
                requested = bulk.requested,
                drawn,
                "серийный розыгрыш остановлен: кончились участники"
            );
        } else {
            info!(prize_id = %bulk.prize_id, drawn, "серийный розыгрыш завершён");
        }

        Ok(BulkDrawOutcome {
            prize_id: bulk.prize_id,
            requested: bulk.requested,
            winners: bulk.winners,
        })
    }

    /// Разыграть все оставшиеся места приза за одну команду.
    ///
    /// Если участники кончатся раньше, возвращается частичный список.
    pub fn draw_all_remaining<R: RandomSource>(
        &mut self,
        prize_id: &PrizeId,
        rng: &mut R,
    ) -> Result<Vec<Winner>, LotteryError> {
        self.begin_bulk_draw(prize_id)?;

        let step_result = loop {
            match self.bulk_draw_step(rng) {
                Ok(Some(_)) => {}
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        let outcome = self.finish_bulk_draw()?;
        step_result?;

        Ok(outcome.winners)
    }

    /// Выбор + фиксация одного победителя. Обе мутации (запись и `remaining`)
    /// выполняются только после того, как всё остальное уже проверено.
    fn draw_step<R: RandomSource>(&mut self, prize_id: &PrizeId, rng: &mut R) -> Result<Winner, LotteryError> {
        let prize_idx = self
            .prizes
            .iter()
            .position(|p| &p.id == prize_id)
            .ok_or(LotteryError::NoPrizeSelected)?;

        if self.prizes[prize_idx].is_exhausted() {
            return Err(LotteryError::PrizeExhausted(prize_id.clone()));
        }

        let (participant, from_preset) = {
            let eligible = eligible_participants(&self.participants, &self.winners);
            if eligible.is_empty() {
                return Err(LotteryError::NoEligibleParticipants);
            }

            let preset = self.presets.iter().find(|p| &p.prize_id == prize_id);
            let chosen = select_winner(&eligible, preset, rng)?;
            let from_preset = preset.map_or(false, |p| p.participant_names.iter().any(|n| n == &chosen.name));

            (chosen.clone(), from_preset)
        };

        let timestamp = self.clock.now_ms().max(self.last_timestamp + 1);
        let winner = Winner::from_draw(self.ids.next_winner_id(), &participant, &self.prizes[prize_idx], timestamp);

        self.winners.push(winner.clone());
        self.prizes[prize_idx].remaining -= 1;
        self.last_timestamp = timestamp;

        self.log.push(DrawEventKind::WinnerDrawn {
            winner_id: winner.id.clone(),
            participant_id: winner.participant_id.clone(),
            prize_id: prize_id.clone(),
            from_preset,
        });
        info!(
            prize_id = %prize_id,
            participant = %winner.participant_name,
            remaining = self.prizes[prize_idx].remaining,
            from_preset,
            "победитель выбран"
        );

        Ok(winner)
    }

    /// Удалить запись о выигрыше и вернуть место призу.
    ///
    /// Если приз уже удалён, возврат места молча пропускается.
    pub fn remove_winner(&mut self, winner_id: &WinnerId) -> Result<Winner, LotteryError> {
        self.ensure_idle()?;

        let idx = self
            .winners
            .iter()
            .position(|w| &w.id == winner_id)
            .ok_or_else(|| LotteryError::WinnerNotFound(winner_id.clone()))?;

        let winner = self.winners.remove(idx);

        if let Some(prize) = self.prizes.iter_mut().find(|p| p.id == winner.prize_id) {
            prize.remaining = (prize.remaining + 1).min(prize.count);
        } else {
            debug!(prize_id = %winner.prize_id, "приз победителя уже удалён, remaining не меняем");
        }

        self.log.push(DrawEventKind::WinnerRemoved {
            winner_id: winner.id.clone(),
            prize_id: winner.prize_id.clone(),
        });
        info!(winner_id = %winner.id, participant = %winner.participant_name, "запись о выигрыше удалена");

        Ok(winner)
    }

    /// Сбросить результаты: победители удаляются, все места возвращаются.
    /// Участники, призы и пресеты не трогаются.
    pub fn reset_results(&mut self) -> Result<(), LotteryError> {
        self.ensure_idle()?;

        self.winners.clear();
        for prize in self.prizes.iter_mut() {
            prize.remaining = prize.count;
        }

        self.log.push(DrawEventKind::ResultsReset);
        info!("результаты розыгрыша сброшены");
        Ok(())
    }

    /// Очистить всё: участников, призы, победителей, пресеты и курсор.
    /// Названия мероприятия возвращаются к значениям по умолчанию.
    pub fn reset_all(&mut self) -> Result<(), LotteryError> {
        self.ensure_idle()?;

        self.participants.clear();
        self.prizes.clear();
        self.winners.clear();
        self.presets.clear();
        self.activity = ActivityInfo::default();
        self.cursor = None;

        // Журнал прошлых репетиций больше не нужен.
        self.log.clear();
        self.log.push(DrawEventKind::AllReset);
        warn!("все данные лотереи очищены");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Курсор
    // ---------------------------------------------------------------------

    pub fn set_current_prize(&mut self, prize_id: &PrizeId) -> Result<(), LotteryError> {
        self.ensure_idle()?;

        if self.prize(prize_id).is_none() {
            return Err(LotteryError::PrizeNotFound(prize_id.clone()));
        }
        self.cursor = Some(prize_id.clone());
        Ok(())
    }

    /// Сдвинуть курсор на соседний приз. На границах ничего не делает.
    ///
    /// Возвращает текущее значение курсора.
    pub fn advance_cursor(&mut self, direction: CursorDirection) -> Result<Option<PrizeId>, LotteryError> {
        self.ensure_idle()?;

        if let Some(current) = self.cursor.as_ref() {
            if let Some(next) = step_cursor(&self.prizes, current, direction) {
                debug!(from = %current, to = %next, "курсор сдвинут");
                self.cursor = Some(next);
            }
        }

        Ok(self.cursor.clone())
    }

    /// Если текущий приз разыгран полностью, перейти к следующему.
    pub fn advance_past_exhausted(&mut self) -> Result<Option<PrizeId>, LotteryError> {
        let exhausted = self.current_prize().map_or(false, |p| p.is_exhausted());
        if exhausted {
            self.advance_cursor(CursorDirection::Next)
        } else {
            self.ensure_idle()?;
            Ok(self.cursor.clone())
        }
    }

    fn repair_cursor(&mut self) {
        let repaired = repair_cursor(&self.prizes, self.cursor.as_ref());
        if repaired != self.cursor {
            debug!(from = ?self.cursor, to = ?repaired, "курсор восстановлен");
            self.cursor = repaired;
        }
    }

    // ---------------------------------------------------------------------
    // Участники
    // ---------------------------------------------------------------------

    /// Добавить участника с новым id.
    pub fn add_participant(
        &mut self,
        name: impl Into<String>,
        department: Option<String>,
    ) -> Result<Participant, LotteryError> {
        self.ensure_idle()?;

        let name: String = name.into();
        let participant = Participant::new(self.ids.next_participant_id(), name.trim(), department);
        validate_participant(&participant)?;

        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Добавить или заменить участника по id.
    ///
    /// Существующие записи о выигрыше не меняются: они хранят свой снимок полей.
    pub fn upsert_participant(&mut self, mut participant: Participant) -> Result<(), LotteryError> {
        self.ensure_idle()?;

        // Пресеты сравниваются с обрезанным именем.
        participant.name = participant.name.trim().to_string();
        participant.department = participant
            .department
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        validate_participant(&participant)?;

        match self.participants.iter_mut().find(|p| p.id == participant.id) {
            Some(existing) => *existing = participant,
            None => self.participants.push(participant),
        }
        Ok(())
    }

    pub fn remove_participant(&mut self, participant_id: &ParticipantId) -> Result<Participant, LotteryError> {
        self.ensure_idle()?;

        let idx = self
            .participants
            .iter()
            .position(|p| &p.id == participant_id)
            .ok_or_else(|| LotteryError::ParticipantNotFound(participant_id.clone()))?;

        Ok(self.participants.remove(idx))
    }

    /// Дописать импортированных участников в конец списка.
    pub fn import_participants(&mut self, rows: Vec<ParticipantRow>) -> Result<Vec<ParticipantId>, LotteryError> {
        self.ensure_idle()?;

        let imported: Vec<Participant> = rows
            .into_iter()
            .map(|row| Participant::new(self.ids.next_participant_id(), row.name, row.department))
            .collect();
        for p in &imported {
            validate_participant(p)?;
        }

        let ids: Vec<ParticipantId> = imported.iter().map(|p| p.id.clone()).collect();
        self.participants.extend(imported);

        info!(imported = ids.len(), total = self.participants.len(), "участники импортированы");
        Ok(ids)
    }

    // ---------------------------------------------------------------------
    // Призы
    // ---------------------------------------------------------------------

    /// Добавить приз-заготовку в конец списка.
    pub fn add_default_prize(&mut self) -> Result<Prize, LotteryError> {
        self.ensure_idle()?;

        let rank = self.prizes.len() as i64 + 1;
        let prize = Prize::new(self.ids.next_prize_id(), NEW_PRIZE_CATEGORY, NEW_PRIZE_NAME, 1, rank);

        self.prizes.push(prize.clone());
        self.repair_cursor();
        Ok(prize)
    }

    /// Добавить или отредактировать приз по id.
    ///
    /// `remaining` из входных данных игнорируется и всегда пересчитывается
    /// как `count - число победителей этого приза`.
    pub fn upsert_prize(&mut self, mut prize: Prize) -> Result<Prize, LotteryError> {
        self.ensure_idle()?;

        let won = won_count(&self.winners, &prize.id);
        validate_prize(&prize, won)?;
        prize.remaining = prize.count - won;

        match self.prizes.iter_mut().find(|p| p.id == prize.id) {
            Some(existing) => *existing = prize.clone(),
            None => self.prizes.push(prize.clone()),
        }

        self.repair_cursor();
        Ok(prize)
    }

    /// Удалить приз. Записи о выигрыше этого приза остаются как есть.
    pub fn remove_prize(&mut self, prize_id: &PrizeId) -> Result<Prize, LotteryError> {
        self.ensure_idle()?;

        let idx = self
            .prizes
            .iter()
            .position(|p| &p.id == prize_id)
            .ok_or_else(|| LotteryError::PrizeNotFound(prize_id.clone()))?;

        let removed = self.prizes.remove(idx);
        self.repair_cursor();
        Ok(removed)
    }

    /// Дописать импортированные призы. `rank` по умолчанию –
    /// `число призов до импорта + индекс строки + 1`.
    pub fn import_prizes(&mut self, rows: Vec<PrizeRow>) -> Result<Vec<PrizeId>, LotteryError> {
        self.ensure_idle()?;

        let base = self.prizes.len() as i64;
        let imported: Vec<Prize> = rows
            .into_iter()
            .map(|row| {
                let rank = row.rank.unwrap_or(base + row.row_index as i64 + 1);
                Prize::new(self.ids.next_prize_id(), row.category, row.name, row.count, rank)
            })
            .collect();
        for p in &imported {
            validate_prize(p, 0)?;
        }

        let ids: Vec<PrizeId> = imported.iter().map(|p| p.id.clone()).collect();
        self.prizes.extend(imported);
        self.repair_cursor();

        info!(imported = ids.len(), total = self.prizes.len(), "призы импортированы");
        Ok(ids)
    }

    // ---------------------------------------------------------------------
    // Пресеты
    // ---------------------------------------------------------------------

    /// Заменить очередь пресета приза целиком.
    pub fn upsert_preset(&mut self, preset: PresetWinner) -> Result<(), LotteryError> {
        self.ensure_idle()?;

        if self.prize(&preset.prize_id).is_none() {
            return Err(LotteryError::PrizeNotFound(preset.prize_id.clone()));
        }
        validate_preset(&preset)?;

        match self.presets.iter_mut().find(|p| p.prize_id == preset.prize_id) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
        Ok(())
    }

    /// Дописать имя в очередь пресета. Повтор имени – no-op (`Ok(false)`).
    pub fn add_preset_name(&mut self, prize_id: &PrizeId, name: &str) -> Result<bool, LotteryError> {
        self.ensure_idle()?;

        if self.prize(prize_id).is_none() {
            return Err(LotteryError::PrizeNotFound(prize_id.clone()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(LotteryError::Validation("Preset: empty participant name".into()));
        }

        let idx = match self.presets.iter().position(|p| &p.prize_id == prize_id) {
            Some(idx) => idx,
            None => {
                self.presets.push(PresetWinner::new(prize_id.clone()));
                self.presets.len() - 1
            }
        };

        Ok(self.presets[idx].push_name(name))
    }

    /// Убрать имя из очереди пресета. `Ok(false)`, если имени там не было.
    pub fn remove_preset_name(&mut self, prize_id: &PrizeId, name: &str) -> Result<bool, LotteryError> {
        self.ensure_idle()?;

        Ok(self
            .presets
            .iter_mut()
            .find(|p| &p.prize_id == prize_id)
            .map_or(false, |p| p.remove_name(name)))
    }

    // ---------------------------------------------------------------------
    // Настройки
    // ---------------------------------------------------------------------

    pub fn set_activity_info(&mut self, info: ActivityInfo) -> Result<(), LotteryError> {
        self.ensure_idle()?;
        self.activity = info;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), LotteryError> {
        if self.bulk.is_some() {
            return Err(LotteryError::DrawInProgress);
        }
        Ok(())
    }
}
