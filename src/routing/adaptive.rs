/*!

Adaptive strategies for 3D meshes and the placeholders for user routings.

Adaptive strategies compute a list of candidate directions and let [choose_adaptive_outport] select among them by the number of free virtual channels of each outport, as given by the router at this moment.

*/

use ::rand::rngs::StdRng;

use crate::match_object;
use crate::error;
use super::DirectionRegistry;
use super::prelude::*;

/**
Select among `candidates` the registered outport with the most free virtual channels.
Candidates without a registered outport are skipped. Ties go to the first candidate in the list.
An outport without free channels can still be selected when it is the only one.
**/
pub fn choose_adaptive_outport(candidates:&[PortDirection], outports:&DirectionRegistry, router:&dyn RouterContext) -> Result<usize,Error>
{
	let mut best:Option<(usize,usize)> = None;
	for direction in candidates
	{
		let port = match outports.try_port(*direction)
		{
			Some(port) => port,
			None => continue,
		};
		let free = router.free_virtual_channels(port);
		match best
		{
			Some((_,best_free)) if free<=best_free => (),
			_ => best = Some((port,free)),
		}
	}
	match best
	{
		Some((port,_)) => Ok(port),
		None => Err(error!(no_adaptive_outport).with_message(format!("none of {:?} has a registered outport",candidates))),
	}
}

fn vertical(dz:i32) -> PortDirection
{
	if dz>0 { PortDirection::Up } else { PortDirection::Down }
}

fn horizontal(dx:i32) -> PortDirection
{
	if dx>0 { PortDirection::East } else { PortDirection::West }
}

fn longitudinal(dy:i32) -> PortDirection
{
	if dy>0 { PortDirection::North } else { PortDirection::South }
}

/**
Odd-even turn model on the XY plane, after correcting Z deterministically.
* East is not offered in odd columns when the packet also has to go North.
* West is not offered in even columns when the packet also has to go South.
**/
#[derive(Debug)]
pub struct OddEven3D
{
}

impl RoutingStrategy for OddEven3D
{
	fn outport_compute(&self, request:&RoutingRequest, unit:&UnitTables, router:&dyn RouterContext, _rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		let extents = router.extents();
		let current = router.router_index();
		let [dx,dy,dz] = extents.cube_deltas(current,request.route.destination_router);
		assert!(dx!=0 || dy!=0 || dz!=0,"OddEven3D routing a packet for router {} that is already there",current);
		if dz != 0
		{
			return unit.outport(vertical(dz));
		}
		let x = extents.cube_coordinates(current)[0];
		let mut candidates = Vec::with_capacity(2);
		if dx>0
		{
			if !(x%2==1 && dy>0)
			{
				candidates.push(PortDirection::East);
			}
		}
		else if dx<0
		{
			if !(x%2==0 && dy<0)
			{
				candidates.push(PortDirection::West);
			}
		}
		if dy != 0
		{
			candidates.push(longitudinal(dy));
		}
		Ok(OutportSelection::port(choose_adaptive_outport(&candidates,unit.outports,router)?))
	}
}

impl OddEven3D
{
	pub fn new(arg:StrategyBuilderArgument) -> Result<OddEven3D,Error>
	{
		match_object!(arg.cv,"OddEven3D",_value);
		Ok(OddEven3D{})
	}
}

///Z first. Then, if both X and Y remain, the one with more free virtual channels; otherwise the remaining one.
#[derive(Debug)]
pub struct PartiallyAdaptive3D
{
}

impl RoutingStrategy for PartiallyAdaptive3D
{
	fn outport_compute(&self, request:&RoutingRequest, unit:&UnitTables, router:&dyn RouterContext, _rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		let current = router.router_index();
		let [dx,dy,dz] = router.extents().cube_deltas(current,request.route.destination_router);
		if dz != 0
		{
			unit.outport(vertical(dz))
		}
		else if dx!=0 && dy!=0
		{
			let candidates = [horizontal(dx),longitudinal(dy)];
			Ok(OutportSelection::port(choose_adaptive_outport(&candidates,unit.outports,router)?))
		}
		else if dx != 0
		{
			unit.outport(horizontal(dx))
		}
		else if dy != 0
		{
			unit.outport(longitudinal(dy))
		}
		else
		{
			panic!("PartiallyAdaptive3D routing a packet for router {} that is already there",current);
		}
	}
}

impl PartiallyAdaptive3D
{
	pub fn new(arg:StrategyBuilderArgument) -> Result<PartiallyAdaptive3D,Error>
	{
		match_object!(arg.cv,"PartiallyAdaptive3D",_value);
		Ok(PartiallyAdaptive3D{})
	}
}

///Slot for a 3D routing. It checks the packet is in transit and then returns an `InvalidRoute` error.
#[derive(Debug)]
pub struct Extension3D
{
}

impl RoutingStrategy for Extension3D
{
	fn outport_compute(&self, request:&RoutingRequest, _unit:&UnitTables, router:&dyn RouterContext, _rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		let current = router.router_index();
		let [dx,dy,dz] = router.extents().cube_deltas(current,request.route.destination_router);
		assert!(dx!=0 || dy!=0 || dz!=0,"Extension3D routing a packet for router {} that is already there",current);
		Err(error!(invalid_route).with_message(format!("Extension3D has no route from router {} to router {}",current,request.route.destination_router)))
	}
}

impl Extension3D
{
	pub fn new(arg:StrategyBuilderArgument) -> Result<Extension3D,Error>
	{
		match_object!(arg.cv,"Extension3D",_value);
		Ok(Extension3D{})
	}
}

///Slot for a routing by port directions. Any use is an `UnimplementedStrategy` error; register a strategy named `Custom` in the plugs to replace it.
#[derive(Debug)]
pub struct Custom
{
}

impl RoutingStrategy for Custom
{
	fn outport_compute(&self, _request:&RoutingRequest, _unit:&UnitTables, _router:&dyn RouterContext, _rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		Err(error!(unimplemented_strategy,"Custom".to_string()))
	}
}

impl Custom
{
	pub fn new(arg:StrategyBuilderArgument) -> Result<Custom,Error>
	{
		match_object!(arg.cv,"Custom",_value);
		Ok(Custom{})
	}
}
