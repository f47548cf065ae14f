//! Quote Session - Swap Quote State Machine
//!
//! The controller the presentation layer talks to. It owns:
//! - the current catalog snapshot and load/error status
//! - the selected source and target assets
//! - the typed (draft) and committed amount text
//! - derived rate and output, recomputed on every change
//! - the in-flight submission flag
//!
//! Amount keystrokes are committed through a `Debouncer`, so derived
//! values only move once typing pauses. Catalog results arriving after
//! `unmount()` are discarded.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::domain::amount::{is_acceptable_amount_text, parse_amount};
use crate::domain::asset::{Asset, Symbol};
use crate::domain::catalog::Catalog;
use crate::domain::error::{FetchError, SelectionError, SubmitError};
use crate::domain::quote_state::{QuoteConditions, QuoteState};
use crate::domain::rate;
use crate::domain::swap::{SwapConfirmation, SwapOrder};
use crate::ports::price_feed::PriceFeed;
use crate::ports::settlement::{SettlementReceipt, SwapSettlement};

use super::debounce::Debouncer;
use super::price_catalog::PriceCatalog;

/// Which side of the swap an intent targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
  /// The asset being paid.
  Source,
  /// The asset being received.
  Target,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteView {
  /// Derived validity state.
  pub state: QuoteState,
  /// Quotable symbols in catalog order.
  pub assets: Vec<Symbol>,
  /// Selected source symbol.
  pub source: Option<Symbol>,
  /// Selected target symbol.
  pub target: Option<Symbol>,
  /// Text as currently typed.
  pub draft_amount_text: String,
  /// Text the derived values are based on.
  pub amount_text: String,
  /// Converted amount.
  pub output: f64,
  /// Converted amount for the read-only field (6 decimals or empty).
  pub output_display: String,
  /// Exchange rate.
  pub rate: f64,
  /// `1 SRC = x DST`, when a rate exists.
  pub rate_display: Option<String>,
  /// Dollar estimate of the typed amount, when a source is selected.
  pub usd_estimate: Option<String>,
  /// Source unit price to 4 decimals, for the rate details.
  pub source_price_display: Option<String>,
  /// Target unit price to 4 decimals, for the rate details.
  pub target_price_display: Option<String>,
  /// Warning: both sides hold the same asset.
  pub is_same_asset: bool,
  /// Warning: amount present but not strictly positive.
  pub is_invalid_amount: bool,
  /// Submission allowed.
  pub is_valid: bool,
  /// Feed fetch in progress.
  pub is_loading: bool,
  /// Last fetch error message.
  pub error: Option<String>,
}

/// Stateful quote controller for one mounted widget.
pub struct QuoteSession<S: SwapSettlement> {
  /// Settlement port.
  settlement: Arc<S>,
  /// Preferred default source symbol.
  primary_symbol: String,
  /// Preferred default target symbol.
  secondary_symbol: String,
  /// Current catalog snapshot.
  catalog: Option<Catalog>,
  /// Feed fetch in progress.
  loading: bool,
  /// User-facing message of the last failed fetch.
  fetch_error: Option<String>,
  /// Asset being paid.
  source: Option<Asset>,
  /// Asset being received.
  target: Option<Asset>,
  /// Latest accepted keystroke text.
  draft_amount_text: String,
  /// Committed amount text.
  amount_text: String,
  /// Committed amount, parsed.
  parsed_amount: f64,
  /// Derived exchange rate.
  rate: f64,
  /// Derived output.
  output: f64,
  /// Settlement call in flight.
  submitting: bool,
  /// Default pair already chosen.
  defaults_applied: bool,
  /// Cleared on unmount; gates late catalog results.
  active: bool,
  /// Pending amount commit.
  input: Debouncer<String>,
}

impl<S: SwapSettlement> QuoteSession<S> {
  /// Create a session in the loading state.
  pub fn new(settlement: Arc<S>, config: &SessionConfig) -> Self {
    Self {
      settlement,
      primary_symbol: config.primary_symbol.clone(),
      secondary_symbol: config.secondary_symbol.clone(),
      catalog: None,
      loading: true,
      fetch_error: None,
      source: None,
      target: None,
      draft_amount_text: String::new(),
      amount_text: String::new(),
      parsed_amount: 0.0,
      rate: 0.0,
      output: 0.0,
      submitting: false,
      defaults_applied: false,
      active: true,
      input: Debouncer::new(Duration::from_millis(config.debounce_ms)),
    }
  }

  // ── Catalog lifecycle ──────────────────────────────────

  /// Mark a feed fetch as started.
  pub fn begin_load(&mut self) {
    self.loading = true;
  }

  /// Apply the outcome of a feed fetch.
  ///
  /// Returns `false` if the session was unmounted and the result was
  /// discarded.
  pub fn apply_catalog(&mut self, result: Result<Catalog, FetchError>) -> bool {
    if !self.active {
      debug!("Discarding price catalog for unmounted session");
      return false;
    }

    match result {
      Ok(catalog) => {
        self.fetch_error = None;
        self.source = Self::resolve_in(&catalog, self.source.take());
        self.target = Self::resolve_in(&catalog, self.target.take());
        self.catalog = Some(catalog);
        self.apply_defaults();
      }
      Err(e) => {
        warn!(cause = %e.cause, "Price catalog unavailable");
        self.fetch_error = Some(e.message);
      }
    }

    self.loading = false;
    self.recompute();
    true
  }

  /// Fetch a fresh catalog and apply it.
  ///
  /// Used for the initial load and for a manual reload after a failure.
  #[instrument(skip(self, catalog))]
  pub async fn load<F: PriceFeed>(&mut self, catalog: &PriceCatalog<F>) -> bool {
    self.begin_load();
    let result = catalog.load().await;
    self.apply_catalog(result)
  }

  /// Tear the session down. Late catalog results are ignored afterwards.
  pub fn unmount(&mut self) {
    self.active = false;
    self.input.cancel();
    debug!("Quote session unmounted");
  }

  /// Whether the session is still mounted.
  pub fn is_active(&self) -> bool {
    self.active
  }

  // ── User intents ───────────────────────────────────────

  /// Select the asset to pay with.
  ///
  /// # Errors
  /// Rejects unknown symbols and the symbol already selected as target.
  pub fn set_source_asset(&mut self, symbol: &str) -> Result<(), SelectionError> {
    let asset = self.resolve_selection(symbol, self.target.as_ref())?;
    debug!(symbol, "Source asset selected");
    self.source = Some(asset);
    self.recompute();
    Ok(())
  }

  /// Select the asset to receive.
  ///
  /// # Errors
  /// Rejects unknown symbols and the symbol already selected as source.
  pub fn set_target_asset(&mut self, symbol: &str) -> Result<(), SelectionError> {
    let asset = self.resolve_selection(symbol, self.source.as_ref())?;
    debug!(symbol, "Target asset selected");
    self.target = Some(asset);
    self.recompute();
    Ok(())
  }

  /// Select an asset for either side.
  ///
  /// # Errors
  /// See [`Self::set_source_asset`] and [`Self::set_target_asset`].
  pub fn select(&mut self, side: Side, symbol: &str) -> Result<(), SelectionError> {
    match side {
      Side::Source => self.set_source_asset(symbol),
      Side::Target => self.set_target_asset(symbol),
    }
  }

  /// Exchange source and target. The amount text is kept.
  pub fn swap_direction(&mut self) {
    std::mem::swap(&mut self.source, &mut self.target);
    self.recompute();
  }

  /// Offer a keystroke result for the amount field.
  ///
  /// Returns `false` (and stores nothing) unless the text is empty or a
  /// non-negative decimal. Accepted text is committed once input has
  /// been idle for the debounce delay.
  pub fn set_amount_text(&mut self, text: &str) -> bool {
    if !is_acceptable_amount_text(text) {
      debug!(text, "Amount keystroke rejected");
      return false;
    }
    self.draft_amount_text = text.to_string();
    self.input.schedule(text.to_string());
    true
  }

  /// Commit the pending amount if its debounce delay has passed.
  pub fn commit_due_input(&mut self) -> bool {
    match self.input.take_due() {
      Some(text) => {
        self.commit_amount(text);
        true
      }
      None => false,
    }
  }

  /// Wait for the pending amount to settle, then commit it.
  ///
  /// Never completes while nothing is pending; cancel-safe.
  pub async fn settle_input(&mut self) {
    let text = self.input.settled().await;
    self.commit_amount(text);
  }

  /// Whether typed text is waiting to be committed.
  pub fn has_pending_input(&self) -> bool {
    self.input.is_pending()
  }

  // ── Submission ─────────────────────────────────────────

  /// Start a submission: validate, freeze the quote into an order and
  /// mark the session as submitting.
  ///
  /// # Errors
  /// Returns `SubmitError::NotReady` with the blocking reason if the
  /// quote is not valid.
  pub fn begin_submit(&mut self) -> Result<SwapOrder, SubmitError> {
    let state = self.state();
    if let Some(reason) = state.blocked_reason() {
      debug!(reason, "Submit refused");
      return Err(SubmitError::NotReady(reason));
    }

    let (Some(source), Some(target)) = (&self.source, &self.target) else {
      return Err(SubmitError::NotReady("select both tokens and enter an amount"));
    };

    let order = SwapOrder {
      id: Uuid::new_v4(),
      amount_text: self.amount_text.clone(),
      amount: self.parsed_amount,
      source: source.symbol.clone(),
      target: target.symbol.clone(),
      rate: self.rate,
      output: self.output,
      created_at: Utc::now(),
    };

    self.submitting = true;
    info!(
      order_id = %order.id,
      source = %order.source,
      target = %order.target,
      amount = order.amount,
      output = order.output,
      "Submitting swap"
    );
    Ok(order)
  }

  /// Finish a submission with the settlement outcome.
  ///
  /// On success the amount is cleared; on failure it is kept so the
  /// user can retry. The submitting flag is reset either way.
  ///
  /// # Errors
  /// Returns `SubmitError::Settlement` if settlement failed, or
  /// `SubmitError::NotSubmitting` if no submission was started.
  pub fn complete_submit(
    &mut self,
    order: SwapOrder,
    outcome: anyhow::Result<SettlementReceipt>,
  ) -> Result<SwapConfirmation, SubmitError> {
    if !self.submitting {
      return Err(SubmitError::NotSubmitting);
    }
    self.submitting = false;

    match outcome {
      Ok(receipt) => {
        self.input.cancel();
        self.draft_amount_text.clear();
        self.amount_text.clear();
        self.recompute();

        let confirmation = SwapConfirmation::new(order, receipt.settled_at);
        info!(
          reference = %receipt.reference,
          message = %confirmation.message,
          "Swap settled"
        );
        Ok(confirmation)
      }
      Err(e) => {
        warn!(order_id = %order.id, error = %e, "Swap settlement failed");
        Err(SubmitError::Settlement(format!("{e:#}")))
      }
    }
  }

  /// Validate, settle and report a swap.
  ///
  /// Dropping the returned future mid-settlement releases the session:
  /// the submitting flag is cleared and the amount is kept.
  ///
  /// # Errors
  /// See [`Self::begin_submit`] and [`Self::complete_submit`].
  #[instrument(skip(self))]
  pub async fn submit(&mut self) -> Result<SwapConfirmation, SubmitError> {
    let order = self.begin_submit()?;
    let settlement = Arc::clone(&self.settlement);
    let outcome = {
      let in_flight = InFlight::new(&mut self.submitting);
      let outcome = settlement.settle(&order).await;
      in_flight.settled();
      outcome
    };
    self.complete_submit(order, outcome)
  }

  // ── Derived state ──────────────────────────────────────

  /// Both sides selected and holding the same asset.
  pub fn is_same_asset(&self) -> bool {
    matches!((&self.source, &self.target), (Some(s), Some(t)) if s == t)
  }

  /// Amount entered but not strictly positive.
  pub fn is_invalid_amount(&self) -> bool {
    !self.amount_text.is_empty() && self.parsed_amount <= 0.0
  }

  /// Submission allowed.
  pub fn is_valid(&self) -> bool {
    self.state().is_valid()
  }

  /// The explicit validity state.
  pub fn state(&self) -> QuoteState {
    QuoteState::derive(self.conditions(), self.fetch_error.as_deref())
  }

  /// Snapshot for rendering.
  pub fn view(&self) -> QuoteView {
    let state = self.state();
    let rate_display = match (&self.source, &self.target) {
      (Some(s), Some(t)) => rate::format_rate(&s.symbol, &t.symbol, self.rate),
      _ => None,
    };

    QuoteView {
      is_valid: state.is_valid(),
      state,
      assets: self
        .assets()
        .iter()
        .map(|a| a.symbol.clone())
        .collect(),
      source: self.source.as_ref().map(|a| a.symbol.clone()),
      target: self.target.as_ref().map(|a| a.symbol.clone()),
      draft_amount_text: self.draft_amount_text.clone(),
      amount_text: self.amount_text.clone(),
      output: self.output,
      output_display: rate::format_output(self.output),
      rate: self.rate,
      rate_display,
      usd_estimate: self
        .source
        .as_ref()
        .map(|s| rate::usd_estimate(&self.draft_amount_text, s.unit_price)),
      source_price_display: self
        .source
        .as_ref()
        .map(|s| rate::format_unit_price(s.unit_price)),
      target_price_display: self
        .target
        .as_ref()
        .map(|t| rate::format_unit_price(t.unit_price)),
      is_same_asset: self.is_same_asset(),
      is_invalid_amount: self.is_invalid_amount(),
      is_loading: self.loading,
      error: self.fetch_error.clone(),
    }
  }

  /// Picker entries for the source side (target excluded).
  pub fn source_candidates(&self, query: &str) -> Vec<&Asset> {
    self.candidates(self.target.as_ref(), query)
  }

  /// Picker entries for the target side (source excluded).
  pub fn target_candidates(&self, query: &str) -> Vec<&Asset> {
    self.candidates(self.source.as_ref(), query)
  }

  // ── Accessors ──────────────────────────────────────────

  /// Quotable assets of the current snapshot.
  pub fn assets(&self) -> &[Asset] {
    self.catalog.as_ref().map_or(&[], Catalog::assets)
  }

  /// Selected source asset.
  pub fn source(&self) -> Option<&Asset> {
    self.source.as_ref()
  }

  /// Selected target asset.
  pub fn target(&self) -> Option<&Asset> {
    self.target.as_ref()
  }

  /// Committed amount text.
  pub fn amount_text(&self) -> &str {
    &self.amount_text
  }

  /// Amount text as typed, possibly not yet committed.
  pub fn draft_amount_text(&self) -> &str {
    &self.draft_amount_text
  }

  /// Committed amount, parsed.
  pub fn parsed_amount(&self) -> f64 {
    self.parsed_amount
  }

  /// Derived exchange rate.
  pub fn rate(&self) -> f64 {
    self.rate
  }

  /// Derived output.
  pub fn output(&self) -> f64 {
    self.output
  }

  /// Feed fetch in progress.
  pub fn is_loading(&self) -> bool {
    self.loading
  }

  /// Last fetch error message.
  pub fn fetch_error(&self) -> Option<&str> {
    self.fetch_error.as_deref()
  }

  /// Settlement call in flight.
  pub fn is_submitting(&self) -> bool {
    self.submitting
  }

  // ── Internals ──────────────────────────────────────────

  fn conditions(&self) -> QuoteConditions {
    QuoteConditions {
      loading: self.loading,
      fetch_failed: self.fetch_error.is_some(),
      submitting: self.submitting,
      has_pair: self.source.is_some() && self.target.is_some(),
      same_asset: self.is_same_asset(),
      has_amount: !self.amount_text.is_empty(),
      invalid_amount: self.is_invalid_amount(),
    }
  }

  fn commit_amount(&mut self, text: String) {
    debug!(text = %text, "Amount committed");
    self.amount_text = text;
    self.recompute();
  }

  fn recompute(&mut self) {
    self.parsed_amount = parse_amount(&self.amount_text);
    self.rate = match (&self.source, &self.target) {
      (Some(s), Some(t)) => rate::rate(s.unit_price, t.unit_price),
      _ => 0.0,
    };
    self.output = rate::output(self.parsed_amount, self.rate);
  }

  fn apply_defaults(&mut self) {
    if self.defaults_applied || self.source.is_some() || self.target.is_some() {
      return;
    }
    let Some(catalog) = &self.catalog else {
      return;
    };
    if let Some((source, target)) =
      catalog.default_pair(&self.primary_symbol, &self.secondary_symbol)
    {
      info!(source = %source, target = %target, "Default pair selected");
      self.source = Some(source);
      self.target = Some(target);
      self.defaults_applied = true;
    }
  }

  fn resolve_in(catalog: &Catalog, selected: Option<Asset>) -> Option<Asset> {
    let selected = selected?;
    let refreshed = catalog.get(&selected.symbol).cloned();
    if refreshed.is_none() {
      warn!(symbol = %selected.symbol, "Selected asset no longer quoted, clearing");
    }
    refreshed
  }

  fn resolve_selection(
    &self,
    symbol: &str,
    counterpart: Option<&Asset>,
  ) -> Result<Asset, SelectionError> {
    let catalog = self.catalog.as_ref().ok_or(SelectionError::NotLoaded)?;
    let asset = catalog
      .get(symbol)
      .ok_or_else(|| SelectionError::UnknownSymbol(symbol.to_string()))?;
    if counterpart.is_some_and(|c| c == asset) {
      return Err(SelectionError::SameAsCounterpart(symbol.to_string()));
    }
    Ok(asset.clone())
  }

  fn candidates(&self, exclude: Option<&Asset>, query: &str) -> Vec<&Asset> {
    self.catalog.as_ref().map_or_else(Vec::new, |c| {
      c.candidates(exclude.map(|a| a.symbol.as_str()), query)
    })
  }
}

/// Clears the submitting flag if a settlement await is abandoned.
struct InFlight<'a> {
  submitting: &'a mut bool,
  settled: bool,
}

impl<'a> InFlight<'a> {
  fn new(submitting: &'a mut bool) -> Self {
    Self {
      submitting,
      settled: false,
    }
  }

  /// Settlement returned; `complete_submit` owns the flag from here.
  fn settled(mut self) {
    self.settled = true;
  }
}

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    if !self.settled {
      *self.submitting = false;
      warn!("Swap submission abandoned before settlement");
    }
  }
}
